use crate::domain::luhn::PAYLOAD_LEN;
use crate::domain::model::Imei;
use rand::Rng;

/// Draws 14 uniform digits and appends their check digit.
pub fn generate_imei<R: Rng + ?Sized>(rng: &mut R) -> Imei {
    let mut payload = [0u8; PAYLOAD_LEN];
    for digit in payload.iter_mut() {
        *digit = rng.random_range(0..10);
    }
    Imei::from_payload(payload)
}

/// Owns a random source and yields identifiers indefinitely.
#[derive(Debug, Clone)]
pub struct ImeiGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> ImeiGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_imei(&mut self) -> Imei {
        generate_imei(&mut self.rng)
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> Iterator for ImeiGenerator<R> {
    type Item = Imei;

    fn next(&mut self) -> Option<Imei> {
        Some(self.next_imei())
    }
}
