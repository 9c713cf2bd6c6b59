//! Font presentation state and composition of the context font string.

/// The pieces of the font string tracked independently so each can be updated
/// without disturbing the others.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    family: String,
    size_px: f64,
    decorations: Vec<String>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size_px: 10.0,
            decorations: Vec::new(),
        }
    }
}

impl FontSpec {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size_px(&self) -> f64 {
        self.size_px
    }

    pub fn decorations(&self) -> &[String] {
        &self.decorations
    }

    pub fn set_family(&mut self, family: impl Into<String>) {
        self.family = family.into();
    }

    pub fn set_size_px(&mut self, size_px: f64) {
        self.size_px = size_px;
    }

    pub fn set_decorations(&mut self, decorations: Vec<String>) {
        self.decorations = decorations;
    }

    /// Composes the font string handed to the context:
    /// `<decorations space-joined> <size>px <family>`.
    pub fn compose(&self) -> String {
        let mut out = String::new();
        for decoration in &self.decorations {
            out.push_str(decoration);
            out.push(' ');
        }
        out.push_str(&format!("{}px {}", self.size_px, self.family));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_defaults() {
        assert_eq!(FontSpec::default().compose(), "10px sans-serif");
    }

    #[test]
    fn composes_decorations_in_order() {
        let mut font = FontSpec::default();
        font.set_decorations(vec!["bold".into(), "italic".into()]);
        font.set_size_px(12.0);
        font.set_family("serif");
        assert_eq!(font.compose(), "bold italic 12px serif");
    }

    #[test]
    fn fractional_sizes_keep_their_fraction() {
        let mut font = FontSpec::default();
        font.set_size_px(10.5);
        assert_eq!(font.compose(), "10.5px sans-serif");
    }
}
