/// The nine launcher categories a user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Accessories,
    Graphics,
    Internet,
    Office,
    Other,
    Programming,
    SoundVideo,
    SystemTools,
    Utilities,
}

#[allow(dead_code)]
impl Category {
    pub const ALL: [Category; 9] = [
        Category::Accessories,
        Category::Graphics,
        Category::Internet,
        Category::Office,
        Category::Other,
        Category::Programming,
        Category::SoundVideo,
        Category::SystemTools,
        Category::Utilities,
    ];

    /// Maps a freedesktop wire token onto a category. This is the input
    /// vocabulary: it differs from the display labels and the two must not be
    /// merged.
    pub fn from_token(token: &str) -> Option<Category> {
        match token {
            "Utility" => Some(Category::Accessories),
            "Graphics" => Some(Category::Graphics),
            "Network" => Some(Category::Internet),
            "Office" => Some(Category::Office),
            "Development" => Some(Category::Programming),
            "AudioVideo" => Some(Category::SoundVideo),
            "System" => Some(Category::SystemTools),
            "Settings" => Some(Category::Utilities),
            "Games" => Some(Category::Other),
            _ => None,
        }
    }

    /// Maps a human display label onto a category. Query vocabulary only.
    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "Accessories" => Some(Category::Accessories),
            "Graphics" => Some(Category::Graphics),
            "Internet" => Some(Category::Internet),
            "Office" => Some(Category::Office),
            "Other" => Some(Category::Other),
            "Programming" => Some(Category::Programming),
            "Sound & Video" => Some(Category::SoundVideo),
            "System Tools" => Some(Category::SystemTools),
            "Utilities" => Some(Category::Utilities),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Category::Accessories => 0,
            Category::Graphics => 1,
            Category::Internet => 2,
            Category::Office => 3,
            Category::Other => 4,
            Category::Programming => 5,
            Category::SoundVideo => 6,
            Category::SystemTools => 7,
            Category::Utilities => 8,
        }
    }
}

// Emission order for the Categories= line. `Other` appears twice: it goes out
// both as Utility and as Games.
const EMIT_ORDER: [(Category, &str); 10] = [
    (Category::Accessories, "Utility"),
    (Category::Graphics, "Graphics"),
    (Category::Internet, "Network"),
    (Category::Office, "Office"),
    (Category::Other, "Utility"),
    (Category::Programming, "Development"),
    (Category::SoundVideo, "AudioVideo"),
    (Category::SystemTools, "System"),
    (Category::Utilities, "Settings"),
    (Category::Other, "Games"),
];

/// Flag set over the nine categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Categories {
    flags: [bool; 9],
}

#[allow(dead_code)]
impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.flags = [false; 9];
    }

    pub fn set(&mut self, category: Category, value: bool) {
        self.flags[category.index()] = value;
    }

    pub fn get(&self, category: Category) -> bool {
        self.flags[category.index()]
    }

    /// Set a flag by its wire token. Unrecognized tokens are ignored.
    pub fn set_by_token(&mut self, token: &str, value: bool) {
        if let Some(category) = Category::from_token(token) {
            self.set(category, value);
        }
    }

    /// Query a flag by its display label. Unrecognized labels read as false.
    pub fn has_by_label(&self, label: &str) -> bool {
        Category::from_label(label).is_some_and(|category| self.get(category))
    }

    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|&f| f)
    }

    /// Semicolon-joined, semicolon-terminated token list in fixed order.
    /// Empty string when no flag is set.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (category, token) in EMIT_ORDER {
            if self.get(category) {
                out.push_str(token);
                out.push(';');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_renders_empty() {
        assert_eq!(Categories::new().render(), "");
    }

    #[test]
    fn accessories_and_graphics() {
        let mut categories = Categories::new();
        categories.set(Category::Accessories, true);
        categories.set(Category::Graphics, true);
        assert_eq!(categories.render(), "Utility;Graphics;");
    }

    #[test]
    fn other_emits_utility_and_games() {
        let mut categories = Categories::new();
        categories.set(Category::Other, true);
        assert_eq!(categories.render(), "Utility;Games;");
    }

    #[test]
    fn full_set_emits_all_ten_tokens() {
        let mut categories = Categories::new();
        for category in Category::ALL {
            categories.set(category, true);
        }
        assert_eq!(
            categories.render(),
            "Utility;Graphics;Network;Office;Utility;Development;AudioVideo;System;Settings;Games;"
        );
    }

    #[test]
    fn token_vocabulary_maps_to_flags() {
        let mut categories = Categories::new();
        categories.set_by_token("Games", true);
        assert!(categories.get(Category::Other));
        categories.set_by_token("Settings", true);
        assert!(categories.get(Category::Utilities));
        categories.set_by_token("Utility", true);
        assert!(categories.get(Category::Accessories));
    }

    #[test]
    fn unknown_token_is_ignored() {
        let mut categories = Categories::new();
        categories.set_by_token("TextEditor", true);
        assert!(categories.is_empty());
    }

    #[test]
    fn label_vocabulary_is_distinct_from_tokens() {
        let mut categories = Categories::new();
        categories.set_by_token("Network", true);
        assert!(categories.has_by_label("Internet"));
        // Wire tokens are not valid labels.
        assert!(!categories.has_by_label("Network"));

        categories.set_by_token("AudioVideo", true);
        assert!(categories.has_by_label("Sound & Video"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut categories = Categories::new();
        for category in Category::ALL {
            categories.set(category, true);
        }
        categories.clear();
        assert!(categories.is_empty());
        assert_eq!(categories.render(), "");
    }
}
