//! Built-in sample categories and their rendered layout.

/// Height of one list row, in pixels.
pub const ITEM_HEIGHT: f64 = 56.0;
/// Height of the category heading block.
pub const HEADER_HEIGHT: f64 = 96.0;
/// Height of one description paragraph.
pub const PARAGRAPH_HEIGHT: f64 = 48.0;

/// Text shown above the content when the top hint is visible.
pub const TOP_HINT_PREFIX: &str = "pull down to switch to";
/// Text shown below the content when the bottom hint is visible.
pub const BOTTOM_HINT_PREFIX: &str = "swipe up to switch to";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryContent {
    pub title: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub content: CategoryContent,
    pub items: Vec<String>,
}

impl Category {
    fn sample(n: usize, label: &str, item_count: usize) -> Self {
        Self {
            id: format!("category{n}"),
            label: label.to_string(),
            content: CategoryContent {
                title: format!("{label} content"),
                description: vec![
                    format!("Details for {label}."),
                    format!("Anything related to {label} goes here."),
                ],
            },
            items: (0..item_count).map(|i| format!("Item {n}-{i}")).collect(),
        }
    }

    /// Laid-out height of this category's content.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        HEADER_HEIGHT
            + PARAGRAPH_HEIGHT * self.content.description.len() as f64
            + ITEM_HEIGHT * self.items.len() as f64
    }
}

/// The four categories the demo ships with.
#[must_use]
pub fn sample_categories() -> Vec<Category> {
    vec![
        Category::sample(1, "Category One", 20),
        Category::sample(2, "Category Two", 15),
        Category::sample(3, "Category Three", 25),
        Category::sample(4, "Category Four", 4),
    ]
}

/// Hint state to render alongside the content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintView {
    pub top: Option<usize>,
    pub bottom: Option<usize>,
}

/// Render the sidebar and the active category as plain text.
#[must_use]
pub fn render_view(categories: &[Category], active: usize, hints: HintView) -> String {
    let mut out = String::new();
    let sidebar: Vec<String> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i == active {
                format!("[{}]", c.label)
            } else {
                format!(" {} ", c.label)
            }
        })
        .collect();
    out.push_str(&sidebar.join("|"));
    out.push('\n');

    let Some(category) = categories.get(active) else {
        return out;
    };
    if let Some(target) = hints.top.and_then(|i| categories.get(i)) {
        out.push_str(&format!("  ^ {TOP_HINT_PREFIX}: {}\n", target.label));
    }
    out.push_str(&format!("  # {}\n", category.content.title));
    for paragraph in &category.content.description {
        out.push_str(&format!("    {paragraph}\n"));
    }
    out.push_str(&format!(
        "    ({} items, {} px)\n",
        category.items.len(),
        category.content_height()
    ));
    if let Some(target) = hints.bottom.and_then(|i| categories.get(i)) {
        out.push_str(&format!("  v {BOTTOM_HINT_PREFIX}: {}\n", target.label));
    }
    out
}
