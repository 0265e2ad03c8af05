/// Seed for the offset sampler, taken from JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let high = (random() * f64::from(u32::MAX)) as u64;
    let low = (random() * f64::from(u32::MAX)) as u64;
    (high << 32) | low
}

/// Splits the location hash into an argv, `#-vv&--seed=3` becomes `["", "-vv", "--seed=3"]`.
pub(crate) fn hash_args(hash: &str) -> impl Iterator<Item = &str> {
    std::iter::once("").chain(hash.split(['#', '&']).filter(|arg| !arg.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_args_always_start_with_program_name() {
        assert_eq!(hash_args("").collect::<Vec<_>>(), [""]);
        assert_eq!(
            hash_args("#-vv&&--seed=3").collect::<Vec<_>>(),
            ["", "-vv", "--seed=3"]
        );
    }
}
