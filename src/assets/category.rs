use std::fmt;

/// Directory every downloaded asset is stored under, relative to the output root
pub const ASSETS_DIR: &str = "assets";

/// Kind of asset, which decides the directory it is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Image,
    Css,
    Js,
    Font,
    Other,
}

impl AssetCategory {
    /// Directory name under `assets/`
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Css => "css",
            Self::Js => "js",
            Self::Font => "font",
            Self::Other => "other",
        }
    }

    /// `/`-separated directory relative to the output root (`assets/css`)
    pub fn directory(&self) -> String {
        format!("{}/{}", ASSETS_DIR, self.dir_name())
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
