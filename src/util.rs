use std::env;

use rand::{distributions, thread_rng, Rng};


pub fn generate_rand_id(length: usize) -> String {
    thread_rng()
        .sample_iter(&distributions::Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Path for a scratch file under the system temp directory.
pub fn temp_path(prefix: &str, ext: &str) -> String {
    env::temp_dir()
        .join(format!("{}-{}.{}", prefix, generate_rand_id(12), ext))
        .to_string_lossy()
        .into_owned()
}
