extern crate rand;

use rand::Rng;

const SECRET_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";

/// Symbols a timer id is built from. Lowercase only so that ids are easy to type.
pub const TIMER_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Draws `len` symbols independently and uniformly from `charset`
pub fn create_random_string(len: usize, charset: &[u8]) -> String {
    let mut rng = rand::thread_rng();

    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

pub fn create_random_secret(secret_len: usize) -> String {
    create_random_string(secret_len, SECRET_CHARSET)
}
