use rand::Rng;

pub const GIFT_CARD_PREFIX: &str = "GC-";
pub const GIFT_CARD_CODE_LEN: usize = 8;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Mints a gift-card code such as `GC-7Q2M0ZKD`.
///
/// Codes come from the thread-local CSPRNG. They are not checked for
/// uniqueness against previously issued codes.
pub fn generate_gift_card_code() -> String {
    generate_gift_card_code_with(&mut rand::thread_rng())
}

pub fn generate_gift_card_code_with<R: Rng>(rng: &mut R) -> String {
    let mut code = String::with_capacity(GIFT_CARD_PREFIX.len() + GIFT_CARD_CODE_LEN);
    code.push_str(GIFT_CARD_PREFIX);
    for _ in 0..GIFT_CARD_CODE_LEN {
        code.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
    code
}

pub fn is_gift_card_code(candidate: &str) -> bool {
    candidate
        .strip_prefix(GIFT_CARD_PREFIX)
        .map(|body| {
            body.len() == GIFT_CARD_CODE_LEN
                && body.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        })
        .unwrap_or(false)
}
