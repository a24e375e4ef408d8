/// The two views reachable in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Workflow,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Workflow => "/voice",
        }
    }

    /// Unknown paths land on the landing view.
    pub fn parse(path: &str) -> Self {
        match path.trim().trim_end_matches('/') {
            "/voice" | "voice" => Self::Workflow,
            _ => Self::Landing,
        }
    }
}
