/// Default session-id length in characters.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Generates a cryptographically secure random token.
///
/// The token consists of alphanumeric characters (a-z, A-Z, 0-9),
/// providing approximately 5.95 bits of entropy per character.
///
/// # Example
///
/// ```rust
/// use warden::crypto::generate_token;
///
/// let token = generate_token(32);
/// assert_eq!(token.len(), 32);
/// ```
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

/// Generates a token with the default length (32 characters).
pub fn generate_token_default() -> String {
    generate_token(DEFAULT_TOKEN_LENGTH)
}
