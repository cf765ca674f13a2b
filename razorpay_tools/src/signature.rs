use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded HMAC-SHA256 signature Razorpay attaches to a completed payment.
///
/// The signed message is `"{order_id}|{payment_id}"`, keyed with the API key secret.
pub fn payment_signature(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a supplied payment signature in constant time.
///
/// Returns false for malformed (non-hex) signatures as well as mismatches.
pub fn verify_payment_signature(key_secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let supplied = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&supplied).is_ok()
}

#[cfg(test)]
mod test {
    use super::*;

    const SECRET: &str = "test_secret";

    #[test]
    fn signature_round_trip() {
        let sig = payment_signature(SECRET, "order_9A33XWu170gUtm", "pay_29QQoUBi66xm2f");
        assert!(verify_payment_signature(SECRET, "order_9A33XWu170gUtm", "pay_29QQoUBi66xm2f", &sig));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let mut sig = payment_signature(SECRET, "order_9A33XWu170gUtm", "pay_29QQoUBi66xm2f");
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_payment_signature(SECRET, "order_9A33XWu170gUtm", "pay_29QQoUBi66xm2f", &sig));
    }

    #[test]
    fn wrong_payment_id_is_rejected() {
        let sig = payment_signature(SECRET, "order_9A33XWu170gUtm", "pay_29QQoUBi66xm2f");
        assert!(!verify_payment_signature(SECRET, "order_9A33XWu170gUtm", "pay_other", &sig));
    }

    #[test]
    fn non_hex_signature_is_rejected() {
        assert!(!verify_payment_signature(SECRET, "order_9A33XWu170gUtm", "pay_29QQoUBi66xm2f", "not-hex!"));
    }
}
