//! Drafts for calls into the embedded contracts.

use znn_types::params::{
    PILLAR_BLOCK_REWARD_PERCENT, PILLAR_DELEGATE_REWARD_PERCENT, PILLAR_REGISTER_ZNN,
    SENTINEL_REGISTER_ZNN, STAKE_MAX_MONTHS, STAKE_MIN_MONTHS, STAKE_TIME_UNIT_SECS,
    TOKEN_ISSUE_FEE_ZNN,
};
use znn_types::{Address, Amount, EmbeddedContract, FormatError, Hash, TokenStandard, ONE_ZNN};

use crate::abi::{encode_call, AbiValue};
use crate::draft::TransactionDraft;

fn call(
    contract: EmbeddedContract,
    token: TokenStandard,
    amount: Amount,
    data: Vec<u8>,
) -> TransactionDraft {
    TransactionDraft::contract_call(contract.address(), token, amount, data)
}

fn no_value_call(contract: EmbeddedContract, data: Vec<u8>) -> TransactionDraft {
    call(contract, TokenStandard::ZNN, Amount::ZERO, data)
}

pub mod plasma {
    use super::*;

    /// Fuse `qsr` to generate plasma for `beneficiary`.
    pub fn fuse(beneficiary: Address, qsr: Amount) -> TransactionDraft {
        call(
            EmbeddedContract::Plasma,
            TokenStandard::QSR,
            qsr,
            encode_call("Fuse", &[AbiValue::Address(beneficiary)]),
        )
    }

    /// Cancel the fusion entry `id` and return its QSR.
    pub fn cancel_fuse(id: Hash) -> TransactionDraft {
        no_value_call(
            EmbeddedContract::Plasma,
            encode_call("CancelFuse", &[AbiValue::Hash(id)]),
        )
    }
}

pub mod stake {
    use super::*;

    /// Lock `znn` for `months` stake periods.
    pub fn stake(months: i64, znn: Amount) -> Result<TransactionDraft, FormatError> {
        if !(STAKE_MIN_MONTHS..=STAKE_MAX_MONTHS).contains(&months) {
            return Err(FormatError::InvalidPayload(format!(
                "stake duration must be between {STAKE_MIN_MONTHS} and {STAKE_MAX_MONTHS} months, got {months}"
            )));
        }
        Ok(call(
            EmbeddedContract::Stake,
            TokenStandard::ZNN,
            znn,
            encode_call("Stake", &[AbiValue::Int64(months * STAKE_TIME_UNIT_SECS)]),
        ))
    }

    /// Revoke the expired stake entry `id`.
    pub fn cancel(id: Hash) -> TransactionDraft {
        no_value_call(EmbeddedContract::Stake, encode_call("Cancel", &[AbiValue::Hash(id)]))
    }

    pub fn collect_reward() -> TransactionDraft {
        no_value_call(EmbeddedContract::Stake, encode_call("CollectReward", &[]))
    }
}

pub mod pillar {
    use super::*;

    /// Register a pillar called `name`, locking the ZNN collateral with the block.
    /// The QSR half of the collateral must already be deposited.
    pub fn register(name: &str, producer: Address, reward: Address) -> TransactionDraft {
        call(
            EmbeddedContract::Pillar,
            TokenStandard::ZNN,
            Amount::new(PILLAR_REGISTER_ZNN * ONE_ZNN),
            encode_call(
                "Register",
                &[
                    AbiValue::String(name.to_owned()),
                    AbiValue::Address(producer),
                    AbiValue::Address(reward),
                    AbiValue::Uint8(PILLAR_BLOCK_REWARD_PERCENT),
                    AbiValue::Uint8(PILLAR_DELEGATE_REWARD_PERCENT),
                ],
            ),
        )
    }

    /// Revoke the pillar called `name` and release its collateral.
    pub fn revoke(name: &str) -> TransactionDraft {
        no_value_call(
            EmbeddedContract::Pillar,
            encode_call("Revoke", &[AbiValue::String(name.to_owned())]),
        )
    }

    /// Deposit `qsr` towards a registration.
    pub fn deposit_qsr(qsr: Amount) -> TransactionDraft {
        call(
            EmbeddedContract::Pillar,
            TokenStandard::QSR,
            qsr,
            encode_call("DepositQsr", &[]),
        )
    }

    /// Return QSR deposited for a registration that never happened.
    pub fn withdraw_qsr() -> TransactionDraft {
        no_value_call(EmbeddedContract::Pillar, encode_call("WithdrawQsr", &[]))
    }

    /// Delegate the account's weight to the pillar called `name`.
    pub fn delegate(name: &str) -> Result<TransactionDraft, FormatError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormatError::InvalidPayload("pillar name cannot be empty".into()));
        }
        Ok(no_value_call(
            EmbeddedContract::Pillar,
            encode_call("Delegate", &[AbiValue::String(name.to_owned())]),
        ))
    }

    pub fn undelegate() -> TransactionDraft {
        no_value_call(EmbeddedContract::Pillar, encode_call("Undelegate", &[]))
    }
}

pub mod sentinel {
    use super::*;

    /// Deposit `qsr` towards a registration.
    pub fn deposit_qsr(qsr: Amount) -> TransactionDraft {
        call(
            EmbeddedContract::Sentinel,
            TokenStandard::QSR,
            qsr,
            encode_call("DepositQsr", &[]),
        )
    }

    /// Register a sentinel, locking the ZNN collateral with the block. The QSR half
    /// of the collateral must already be deposited.
    pub fn register() -> TransactionDraft {
        call(
            EmbeddedContract::Sentinel,
            TokenStandard::ZNN,
            Amount::new(SENTINEL_REGISTER_ZNN * ONE_ZNN),
            encode_call("Register", &[]),
        )
    }

    pub fn revoke() -> TransactionDraft {
        no_value_call(EmbeddedContract::Sentinel, encode_call("Revoke", &[]))
    }
}

pub mod token {
    use super::*;

    /// Parameters of a token to issue. Supplies are in base units.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct NewToken {
        pub name: String,
        pub symbol: String,
        pub domain: String,
        pub total_supply: Amount,
        pub max_supply: Amount,
        pub decimals: u8,
        pub mintable: bool,
        pub burnable: bool,
        pub utility: bool,
    }

    /// Issue `token`, paying the issuance fee in ZNN.
    pub fn issue(token: &NewToken) -> TransactionDraft {
        call(
            EmbeddedContract::Token,
            TokenStandard::ZNN,
            Amount::new(TOKEN_ISSUE_FEE_ZNN * ONE_ZNN),
            encode_call(
                "IssueToken",
                &[
                    AbiValue::String(token.name.clone()),
                    AbiValue::String(token.symbol.clone()),
                    AbiValue::String(token.domain.clone()),
                    AbiValue::Uint256(token.total_supply.raw()),
                    AbiValue::Uint256(token.max_supply.raw()),
                    AbiValue::Uint8(token.decimals),
                    AbiValue::Bool(token.mintable),
                    AbiValue::Bool(token.burnable),
                    AbiValue::Bool(token.utility),
                ],
            ),
        )
    }

    /// Mint `amount` of `token` to `receiver`. Only the owner may mint.
    pub fn mint(token: TokenStandard, amount: Amount, receiver: Address) -> TransactionDraft {
        no_value_call(
            EmbeddedContract::Token,
            encode_call(
                "Mint",
                &[
                    AbiValue::TokenStandard(token),
                    AbiValue::Uint256(amount.raw()),
                    AbiValue::Address(receiver),
                ],
            ),
        )
    }

    /// Set the owner and flags of `token`. Minting, once disabled, stays disabled.
    pub fn update(
        token: TokenStandard,
        owner: Address,
        mintable: bool,
        burnable: bool,
    ) -> TransactionDraft {
        no_value_call(
            EmbeddedContract::Token,
            encode_call(
                "UpdateToken",
                &[
                    AbiValue::TokenStandard(token),
                    AbiValue::Address(owner),
                    AbiValue::Bool(mintable),
                    AbiValue::Bool(burnable),
                ],
            ),
        )
    }

    /// Burn `amount` of `token`; the value travels with the block.
    pub fn burn(token: TokenStandard, amount: Amount) -> TransactionDraft {
        call(EmbeddedContract::Token, token, amount, encode_call("Burn", &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::selector;
    use znn_types::BlockType;

    #[test]
    fn fuse_carries_qsr_to_plasma_contract() {
        let draft = plasma::fuse(Address::new([1; 20]), Amount::new(10 * 100_000_000));
        assert_eq!(draft.block_type(), BlockType::UserSend);
        assert_eq!(*draft.to_address(), EmbeddedContract::Plasma.address());
        assert_eq!(*draft.token_standard(), TokenStandard::QSR);
        assert_eq!(draft.amount(), Amount::new(1_000_000_000));
        assert_eq!(&draft.data()[..4], &selector("Fuse(address)"));
    }

    #[test]
    fn stake_encodes_seconds() {
        let draft = stake::stake(2, Amount::new(100_000_000)).unwrap();
        assert_eq!(*draft.to_address(), EmbeddedContract::Stake.address());
        assert_eq!(&draft.data()[..4], &selector("Stake(int64)"));
        let secs = i64::from_be_bytes(draft.data()[28..36].try_into().unwrap());
        assert_eq!(secs, 2 * STAKE_TIME_UNIT_SECS);
    }

    #[test]
    fn stake_rejects_out_of_range_duration() {
        assert!(stake::stake(0, Amount::new(1)).is_err());
        assert!(stake::stake(13, Amount::new(1)).is_err());
    }

    #[test]
    fn stake_reward_collection_carries_no_value() {
        let draft = stake::collect_reward();
        assert_eq!(*draft.to_address(), EmbeddedContract::Stake.address());
        assert_eq!(draft.data(), &selector("CollectReward()")[..]);
        assert_eq!(draft.amount(), Amount::ZERO);
    }

    #[test]
    fn pillar_registration_locks_znn_collateral() {
        let draft = pillar::register("Pillar1", Address::new([1; 20]), Address::new([2; 20]));
        assert_eq!(*draft.to_address(), EmbeddedContract::Pillar.address());
        assert_eq!(*draft.token_standard(), TokenStandard::ZNN);
        assert_eq!(draft.amount(), Amount::new(15_000 * ONE_ZNN));
        assert_eq!(
            &draft.data()[..4],
            &selector("Register(string,address,address,uint8,uint8)")
        );
        // the delegate share sits in the fifth head word
        assert_eq!(draft.data()[4 + 5 * 32 - 1], 100);
    }

    #[test]
    fn pillar_revoke_names_the_pillar() {
        let draft = pillar::revoke("Pillar1");
        assert_eq!(&draft.data()[..4], &selector("Revoke(string)"));
        assert_eq!(&draft.data()[4 + 64..4 + 71], b"Pillar1");
        assert_eq!(draft.amount(), Amount::ZERO);
        assert_eq!(pillar::withdraw_qsr().data(), &selector("WithdrawQsr()")[..]);
    }

    #[test]
    fn sentinel_calls_target_sentinel_contract() {
        let register = sentinel::register();
        assert_eq!(*register.to_address(), EmbeddedContract::Sentinel.address());
        assert_eq!(register.amount(), Amount::new(5_000 * ONE_ZNN));
        assert_eq!(register.data(), &selector("Register()")[..]);

        let revoke = sentinel::revoke();
        assert_eq!(*revoke.to_address(), EmbeddedContract::Sentinel.address());
        assert_eq!(revoke.amount(), Amount::ZERO);
    }

    #[test]
    fn deposits_carry_qsr_to_their_contract() {
        let qsr = Amount::new(50_000 * 100_000_000);
        for (draft, contract) in [
            (pillar::deposit_qsr(qsr), EmbeddedContract::Pillar),
            (sentinel::deposit_qsr(qsr), EmbeddedContract::Sentinel),
        ] {
            assert_eq!(*draft.to_address(), contract.address());
            assert_eq!(*draft.token_standard(), TokenStandard::QSR);
            assert_eq!(draft.amount(), qsr);
            assert_eq!(draft.data(), &selector("DepositQsr()")[..]);
        }
    }

    #[test]
    fn issue_pays_fee_and_encodes_every_field() {
        let draft = token::issue(&token::NewToken {
            name: "MyToken".into(),
            symbol: "MTK".into(),
            domain: "example.com".into(),
            total_supply: Amount::new(1_000),
            max_supply: Amount::new(10_000),
            decimals: 2,
            mintable: true,
            burnable: false,
            utility: true,
        });
        assert_eq!(*draft.to_address(), EmbeddedContract::Token.address());
        assert_eq!(*draft.token_standard(), TokenStandard::ZNN);
        assert_eq!(draft.amount(), Amount::new(ONE_ZNN));
        assert_eq!(
            &draft.data()[..4],
            &selector("IssueToken(string,string,string,uint256,uint256,uint8,bool,bool,bool)")
        );
        let word = |i: usize| &draft.data()[4 + i * 32..4 + (i + 1) * 32];
        assert_eq!(&word(3)[30..], &1_000u16.to_be_bytes());
        assert_eq!(word(5)[31], 2);
        assert_eq!(word(6)[31], 1);
        assert_eq!(word(7)[31], 0);
        assert_eq!(word(8)[31], 1);
    }

    #[test]
    fn ownership_update_keeps_flags_explicit() {
        let zts = TokenStandard::new([3; 10]);
        let draft = token::update(zts, Address::new([9; 20]), false, true);
        assert_eq!(
            &draft.data()[..4],
            &selector("UpdateToken(tokenStandard,address,bool,bool)")
        );
        assert_eq!(&draft.data()[4 + 22..4 + 32], &[3; 10]);
        assert_eq!(draft.data()[4 + 3 * 32 - 1], 0);
        assert_eq!(draft.data()[4 + 4 * 32 - 1], 1);
        assert_eq!(draft.amount(), Amount::ZERO);

        let mint = token::mint(zts, Amount::new(7), Address::new([9; 20]));
        assert_eq!(&mint.data()[..4], &selector("Mint(tokenStandard,uint256,address)"));
        assert_eq!(mint.data()[4 + 2 * 32 - 1], 7);
    }

    #[test]
    fn delegate_rejects_blank_name() {
        assert!(matches!(
            pillar::delegate("  "),
            Err(FormatError::InvalidPayload(_))
        ));
        let draft = pillar::delegate("Pillar1").unwrap();
        assert_eq!(*draft.to_address(), EmbeddedContract::Pillar.address());
    }

    #[test]
    fn burn_sends_value_to_token_contract() {
        let draft = token::burn(TokenStandard::ZNN, Amount::new(5));
        assert_eq!(*draft.to_address(), EmbeddedContract::Token.address());
        assert_eq!(draft.amount(), Amount::new(5));
        assert_eq!(draft.data(), &selector("Burn()")[..]);
    }
}
