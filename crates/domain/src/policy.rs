//! Ingredient term policy: which substrings flag a product and how ingredient
//! text is normalized before matching

/// Ordered term lists plus literal rewrites applied before matching
#[derive(Debug, Clone, Copy)]
pub struct TermPolicy {
    /// Checked first; the first contained term wins
    pub haram_terms: &'static [&'static str],
    /// Checked only when no haram term matched
    pub doubtful_terms: &'static [&'static str],
    /// `(from, to)` substitutions applied after lower-casing
    pub rewrites: &'static [(&'static str, &'static str)],
}

impl TermPolicy {
    pub const STANDARD: TermPolicy = TermPolicy {
        haram_terms: &["pork", "lard", "bacon", "alcohol", "wine", "beer"],
        doubtful_terms: &["gelatin", "enzymes"],
        rewrites: &[("gelatine", "gelatin"), ("ethanol", "alcohol")],
    };

    /// Lower-case, trim and apply the rewrites
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = text.trim().to_lowercase();
        for &(from, to) in self.rewrites {
            if normalized.contains(from) {
                normalized = normalized.replace(from, to);
            }
        }
        normalized
    }

    pub fn find_haram<'a>(&'a self, normalized: &str) -> Option<&'a str> {
        first_contained(self.haram_terms, normalized)
    }

    pub fn find_doubtful<'a>(&'a self, normalized: &str) -> Option<&'a str> {
        first_contained(self.doubtful_terms, normalized)
    }
}

impl Default for TermPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn first_contained<'a>(terms: &'a [&'static str], text: &str) -> Option<&'a str> {
    terms.iter().copied().find(|term| text.contains(term))
}
