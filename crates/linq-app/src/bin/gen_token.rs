use linq_app::settings::{parse_token_ttl, DEFAULT_TOKEN_TTL_SECS};
use linq_core::crypto::token::sign_token;

fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();

    let secret = std::env::var("LINQ_TOKEN_SECRET")
        .map_err(|_| "LINQ_TOKEN_SECRET is required".to_string())?;
    let ttl_secs = match std::env::var("LINQ_TOKEN_TTL_SECS") {
        Ok(v) => parse_token_ttl(&v)?,
        Err(_) => DEFAULT_TOKEN_TTL_SECS,
    };
    let username = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "defaultUser".to_string());

    let token = sign_token(&secret, &username, ttl_secs).map_err(|e| e.to_string())?;

    println!("TOKEN={token}");
    println!();
    println!("curl -H \"Authorization: Bearer {token}\" http://localhost:3000/protected");

    Ok(())
}
