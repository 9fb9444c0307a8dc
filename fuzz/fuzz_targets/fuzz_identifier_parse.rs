#![no_main]

use libfuzzer_sys::fuzz_target;
use znn_types::{Address, Amount, Hash, TokenStandard};

// Everything a user types is parsed by these; anything accepted must print back to
// an equivalent value.
fuzz_target!(|data: &[u8]| {
    let Some((&decimals, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    if let Ok(address) = text.parse::<Address>() {
        assert_eq!(address.to_string().parse::<Address>(), Ok(address));
    }
    if let Ok(token) = TokenStandard::parse_identifier(text) {
        assert_eq!(TokenStandard::parse_identifier(&token.to_string()), Ok(token));
    }
    if let Ok(hash) = text.parse::<Hash>() {
        assert_eq!(hash.to_string().parse::<Hash>(), Ok(hash));
    }

    let decimals = decimals % 19;
    if let Ok(amount) = Amount::parse(text, decimals) {
        assert_eq!(Amount::parse(&amount.format(decimals), decimals), Ok(amount));
    }
});
