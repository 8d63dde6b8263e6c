use crate::registration::{error, register, CsrfToken, FormData, Passwords};

/// Things that can happen to the registration form
#[derive(Debug)]
pub enum Action {
    /// The user typed in one of the password fields
    PasswordsEdited(Passwords),

    /// The user submitted the form
    Submit {
        /// What's in the password fields right now
        passwords: Passwords,

        /// Every field on the form, in document order
        form: FormData,

        /// The page's anti-forgery token, if it has one
        csrf: Option<CsrfToken>,
    },

    /// The server answered (or we couldn't reach it)
    Registered(error::Result<register::Resp>),
}
