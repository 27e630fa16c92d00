/// Screens of the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Route {
    Login,
    Register,
    Chat,
    Quit,
}

impl Route {
    /// Redirect the chat route to login when no credential is present.
    pub(super) fn guard(self, authenticated: bool) -> Route {
        match self {
            Route::Chat if !authenticated => Route::Login,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_requires_credential() {
        assert_eq!(Route::Chat.guard(false), Route::Login);
        assert_eq!(Route::Chat.guard(true), Route::Chat);
    }

    #[test]
    fn other_routes_are_open() {
        for route in [Route::Login, Route::Register, Route::Quit] {
            assert_eq!(route.guard(false), route);
            assert_eq!(route.guard(true), route);
        }
    }
}
