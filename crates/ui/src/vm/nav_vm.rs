use quiz_core::model::{Theme, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Quiz,
    Calendar,
    Stats,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Quiz, Tab::Calendar, Tab::Stats];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tab::Quiz => "Quiz",
            Tab::Calendar => "Calendar",
            Tab::Stats => "Stats",
        }
    }
}

/// What the navigation bar shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavVm {
    pub active: Tab,
    pub badge: Option<UserBadgeVm>,
    pub theme_toggle_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserBadgeVm {
    pub initial: char,
    pub name: String,
}

impl From<&User> for UserBadgeVm {
    fn from(user: &User) -> Self {
        Self {
            initial: user.initial(),
            name: user.display_name().to_string(),
        }
    }
}

impl NavVm {
    #[must_use]
    pub fn new(active: Tab, user: Option<&User>, theme: Theme) -> Self {
        let theme_toggle_label = match theme {
            Theme::Dark => "Light mode",
            Theme::Light => "Dark mode",
        };
        Self {
            active,
            badge: user.map(UserBadgeVm::from),
            theme_toggle_label,
        }
    }

    #[must_use]
    pub fn tab_class(&self, tab: Tab) -> &'static str {
        if tab == self.active {
            "nav-tab nav-tab--active"
        } else {
            "nav-tab"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::UserId;

    #[test]
    fn signed_out_has_no_badge() {
        let vm = NavVm::new(Tab::Quiz, None, Theme::Dark);
        assert_eq!(vm.badge, None);
        assert_eq!(vm.theme_toggle_label, "Light mode");
        assert_eq!(vm.tab_class(Tab::Quiz), "nav-tab nav-tab--active");
        assert_eq!(vm.tab_class(Tab::Stats), "nav-tab");
    }

    #[test]
    fn badge_uses_email_initial() {
        let user = User::new(UserId::new("u-1"), Some("bob@example.com".into()));
        let vm = NavVm::new(Tab::Stats, Some(&user), Theme::Light);
        let badge = vm.badge.unwrap();
        assert_eq!(badge.initial, 'B');
        assert_eq!(badge.name, "bob");
        assert_eq!(vm.theme_toggle_label, "Dark mode");
    }
}
