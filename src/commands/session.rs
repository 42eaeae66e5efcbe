//! Sign-in, sign-out and the signed-in user.

use crate::args::LoginArgs;
use crate::commands::Out;
use crate::session::{Session, User};
use crate::{Config, Result};

/// Signs in as the user described by `args`, replacing whoever was signed in.
pub async fn login(config: Config, args: LoginArgs) -> Result<Out<User>> {
    let user = User {
        id: args.id().trim().to_string(),
        name: args.name().to_string(),
        email: args.email().to_string(),
        photo: args.photo().map(str::to_string),
    };
    Session::new(config.key_value_store()).sign_in(&user).await?;
    Ok(Out::new(
        format!("Signed in as {} <{}>", user.name, user.email),
        user,
    ))
}

/// Signs out. The user's ledger is kept.
pub async fn logout(config: Config) -> Result<Out<()>> {
    let session = Session::new(config.key_value_store());
    let Some(user) = session.current_user().await? else {
        return Ok("Nobody is signed in".into());
    };
    session.sign_out().await?;
    Ok(format!("Signed out {}", user.name).into())
}

/// Reports the signed-in user, if any.
pub async fn whoami(config: Config) -> Result<Out<User>> {
    match Session::new(config.key_value_store()).current_user().await? {
        Some(user) => Ok(Out::new(
            format!("Signed in as {} <{}> ({})", user.name, user.email, user.id),
            user,
        )),
        None => Ok("Nobody is signed in".into()),
    }
}
