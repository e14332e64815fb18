//! Profile update command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use kmtracker_core::model::ProfileUpdate;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New company name
    #[arg(long)]
    pub company: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Print the updated profile as JSON
    #[arg(long)]
    pub json: bool,
}

impl ProfileArgs {
    fn update(self) -> Option<ProfileUpdate> {
        let update = ProfileUpdate {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            phone: self.phone,
        };
        let empty = update.email.is_none()
            && update.first_name.is_none()
            && update.last_name.is_none()
            && update.company.is_none()
            && update.phone.is_none();
        (!empty).then_some(update)
    }
}

pub async fn run(args: ProfileArgs, session: &CliSession) -> Result<()> {
    session.require_login()?;

    let json = args.json;
    let Some(update) = args.update() else {
        bail!("Nothing to change. Run 'kmtracker whoami' to view the profile.");
    };

    let user = session
        .client
        .update_profile(&update)
        .await
        .context("Failed to update profile")?;

    if json {
        return output::json_pretty(&user);
    }

    output::success("Profile updated");
    super::print_user(&user);

    Ok(())
}
