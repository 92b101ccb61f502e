//! Translation domains and their output layout

use std::fmt;

/// Stain domain a patch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Immunohistochemistry, written to trainA/testA
    Ihc,
    /// Hematoxylin and eosin, written to trainB/testB
    HematoxylinEosin,
}

impl Domain {
    /// File name prefix of written patches
    pub fn prefix(&self) -> &'static str {
        match self {
            Domain::Ihc => "ihc",
            Domain::HematoxylinEosin => "he",
        }
    }

    pub fn train_dir(&self) -> &'static str {
        match self {
            Domain::Ihc => "trainA",
            Domain::HematoxylinEosin => "trainB",
        }
    }

    pub fn test_dir(&self) -> &'static str {
        match self {
            Domain::Ihc => "testA",
            Domain::HematoxylinEosin => "testB",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Ihc => "IHC",
            Domain::HematoxylinEosin => "H&E",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
