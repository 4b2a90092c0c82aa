use super::user::User;

/// The identity behind a request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(User),
}

impl Viewer {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::User(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Viewer::User(user) => Some(user),
            Viewer::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user().map(|u| u.username.as_str())
    }

    /// True when the viewer is logged in as `username`
    pub fn is(&self, username: &str) -> bool {
        self.username() == Some(username)
    }
}

impl From<Option<User>> for Viewer {
    fn from(user: Option<User>) -> Self {
        user.map(Viewer::User).unwrap_or_default()
    }
}
