pub mod bits;
pub mod game;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "jass"
    }

    pub const fn codename() -> &'static str {
        "Schieber"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "jass");
        assert_eq!(AppInfo::codename(), "Schieber");
        assert!(!AppInfo::version().is_empty());
    }
}
