//! Account and session commands.

pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod whoami;

pub use login::LoginArgs;
pub use password::PasswordArgs;
pub use profile::ProfileArgs;
pub use register::RegisterArgs;
pub use whoami::WhoamiArgs;

use kmtracker_core::model::User;

use crate::output;

fn print_user(user: &User) {
    output::field("User", &user.username);
    output::field("Email", &user.email);

    let name = format!("{} {}", user.first_name, user.last_name);
    if !name.trim().is_empty() {
        output::field("Name", name.trim());
    }
    if let Some(company) = &user.company {
        output::field("Company", company);
    }
}
