//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Ava Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# base_url = "http://localhost:8000"
# connect_timeout = 10     # 1-120 seconds
# request_timeout = 120    # 1-3600 seconds, covers streamed replies

[session]
# token_key = "jwt_token"
# credentials_file = "/path/to/credentials.json"

[chat]
# assistant_name = "Ava"
# greeting = "Hey👋, I'm Ava\nAsk me anything or pick a place to start"
# apology = "Sorry, there was an error processing your request."

[logging]
# level = "INFO"           # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
