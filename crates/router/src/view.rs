//! What the renderers are asked to draw.

use sitegate_pages::DynamicPage;
use sitegate_users::User;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    SmsZone,
    Stories,
    BdJobs,
    JobExam,
    Login,
    Register,
    /// The signed-in user's profile. `username` is the path segment, if any;
    /// the profile screen is always handed the current user.
    Profile {
        user: User,
        username: Option<String>,
    },
    AdminDashboard,
    DynamicPage(DynamicPage),
    /// Shown while the redirect away from an unknown slug takes effect.
    PageNotFound {
        slug: String,
    },
}

impl View {
    pub fn title(&self) -> &str {
        match self {
            View::Home => "Home",
            View::SmsZone => "SMS Zone",
            View::Stories => "Stories",
            View::BdJobs => "BD Jobs",
            View::JobExam => "Job Exam",
            View::Login => "Login",
            View::Register => "Register",
            View::Profile { .. } => "Profile",
            View::AdminDashboard => "Admin Dashboard",
            View::DynamicPage(page) => &page.title,
            View::PageNotFound { .. } => "404",
        }
    }
}
