use phantommail_core::Goods;
use rand::{Rng, RngCore};

use crate::faker_rs::adapter::FakeRsAdapter;

/// Draw a goods item; every field is independent of the others.
pub fn generate_goods(rng: &mut dyn RngCore) -> Goods {
    Goods {
        name: FakeRsAdapter::title_words(1, 3, rng),
        quantity: rng.random_range(1..=100),
        weight: rng.random_range(350..=1000),
        volume: rng.random_range(10..=1000),
        description: FakeRsAdapter::sentence(6, 12, rng),
    }
}

#[cfg(test)]
mod tests {
    use phantommail_core::validate_goods;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn goods_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let goods = generate_goods(&mut rng);
            validate_goods(&goods).expect("goods in range");
            assert!(!goods.name.is_empty());
            assert!(!goods.description.is_empty());
        }
    }
}
