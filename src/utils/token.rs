use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Random alphanumeric token used as the unique part of generated field ids.
pub fn generate_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
