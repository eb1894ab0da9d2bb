//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! tf-cli user show --username nina
//! tf-cli user delete --username nina
//! ```

use true_feedback_core::Username;
use true_feedback_server::db::{MessageRepository, UserRepository};

use super::{CommandError, connect};

fn parse_username(username: &str) -> Result<Username, CommandError> {
    Username::parse(username).map_err(|e| CommandError::InvalidUsername(e.to_string()))
}

/// Print a user's public profile and how many messages they hold.
pub async fn show(username: &str) -> Result<(), CommandError> {
    let username = parse_username(username)?;
    let pool = connect().await?;

    let user = UserRepository::new(&pool)
        .get_by_username(&username)
        .await?
        .ok_or_else(|| CommandError::UserNotFound(username.to_string()))?;
    let messages = MessageRepository::new(&pool).count_for_user(user.id).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("id:                    {}", user.id);
        println!("username:              {}", user.username);
        println!("email:                 {}", user.email);
        println!("verified:              {}", user.is_verified);
        println!("accepting messages:    {}", user.is_accepting_messages);
        println!("created:               {}", user.created_at.to_rfc3339());
        println!("messages:              {messages}");
    }
    Ok(())
}

/// Delete a user. Their messages go with them.
pub async fn delete(username: &str) -> Result<(), CommandError> {
    let username = parse_username(username)?;
    let pool = connect().await?;

    if !UserRepository::new(&pool).delete_by_username(&username).await? {
        return Err(CommandError::UserNotFound(username.to_string()));
    }

    tracing::info!(username = %username, "User deleted");
    Ok(())
}
