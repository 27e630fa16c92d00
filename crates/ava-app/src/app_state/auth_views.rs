//! Login and registration views.

use ava_chat::{ChatError, NewUser};
use ava_common::AvaError;

use super::route::Route;
use super::AvaApp;

/// Check a registration form before it is sent.
fn check_new_user(user: &NewUser) -> Result<(), &'static str> {
    let fields = [
        &user.first_name,
        &user.last_name,
        &user.email,
        &user.password,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err("All fields are required.");
    }
    if !user.email.contains('@') {
        return Err("Please enter a valid email address.");
    }
    Ok(())
}

impl AvaApp {
    pub(super) async fn login_view(&mut self) -> Result<Route, AvaError> {
        println!("\n== Log in to {} ==", self.config.chat.assistant_name);
        println!("Type /register to create an account or /quit to exit.");

        let Some(email) = self.prompt.ask("Email: ").await? else {
            return Ok(Route::Quit);
        };
        let email = email.trim();
        match email {
            "" => return Ok(Route::Login),
            "/register" => return Ok(Route::Register),
            "/quit" => return Ok(Route::Quit),
            _ => {}
        }
        let Some(password) = self.prompt.ask("Password: ").await? else {
            return Ok(Route::Quit);
        };

        match self.auth.login(email, &password).await {
            Ok(()) => Ok(Route::Chat),
            Err(ChatError::InvalidCredentials) => {
                println!("Incorrect email or password.");
                Ok(Route::Login)
            }
            Err(e) => {
                println!("Login failed: {e}");
                Ok(Route::Login)
            }
        }
    }

    pub(super) async fn register_view(&mut self) -> Result<Route, AvaError> {
        println!("\n== Create an account ==");

        let mut answers = Vec::with_capacity(4);
        for label in ["First name: ", "Last name: ", "Email: ", "Password: "] {
            match self.prompt.ask(label).await? {
                Some(answer) => answers.push(answer.trim().to_string()),
                None => return Ok(Route::Quit),
            }
        }
        let [first_name, last_name, email, password]: [String; 4] = match answers.try_into() {
            Ok(fields) => fields,
            Err(_) => return Ok(Route::Register),
        };
        let user = NewUser {
            first_name,
            last_name,
            email,
            password,
        };

        if let Err(problem) = check_new_user(&user) {
            println!("{problem}");
            return Ok(Route::Register);
        }

        match self.auth.register(&user).await {
            Ok(created) => {
                println!("Account created for {}. Please log in.", created.email);
                Ok(Route::Login)
            }
            Err(e) => {
                println!("Registration failed: {e}");
                Ok(Route::Register)
            }
        }
    }
}
