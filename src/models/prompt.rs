//! Predefined prompt shortcuts.

/// A canned prompt the user can send with one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptShortcut {
    /// Selection key such as `1-2`
    pub key: &'static str,
    /// Text submitted when selected
    pub text: &'static str,
}

/// A titled group of prompt shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptGroup {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub prompts: Vec<PromptShortcut>,
}

pub fn default_prompt_groups() -> Vec<PromptGroup> {
    vec![
        PromptGroup {
            key: "1",
            title: "Hot Topics",
            description: "What are you interested in?",
            prompts: vec![
                PromptShortcut { key: "1-1", text: "How are you" },
                PromptShortcut { key: "1-2", text: "What's AGI?" },
                PromptShortcut { key: "1-3", text: "Where is the doc?" },
            ],
        },
        PromptGroup {
            key: "2",
            title: "Design Guide",
            description: "How to design a good product?",
            prompts: vec![
                PromptShortcut { key: "2-1", text: "Know the well" },
                PromptShortcut { key: "2-2", text: "Set the AI role" },
                PromptShortcut { key: "2-3", text: "Express the feeling" },
            ],
        },
    ]
}

/// Look up a shortcut by key.
pub fn find_prompt<'a>(groups: &'a [PromptGroup], key: &str) -> Option<&'a PromptShortcut> {
    groups
        .iter()
        .flat_map(|group| group.prompts.iter())
        .find(|prompt| prompt.key == key)
}
