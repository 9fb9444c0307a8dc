//! Transaction drafts and the typed stages a block passes through.
//!
//! ```text
//! TransactionDraft ─assemble─▶ AssembledBlock ─hash─▶ HashedBlock
//!     ─resolve─▶ ResolvedBlock ─sign─▶ SignedBlock ─publish─▶ PublishedBlock
//! ```
//!
//! Each stage consumes the previous value. Stage values can only be produced by the
//! functions in this crate, so a signed block always carries a digest taken over final
//! structural fields, and exactly one resource payment.

use znn_types::{
    AccountBlock, Address, Amount, BlockType, Hash, HashHeight, Nonce, PublicKey, Signature,
    TokenStandard,
};

/// One pending account-chain operation, before any ledger lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    block_type: BlockType,
    to_address: Address,
    amount: Amount,
    token_standard: TokenStandard,
    from_block_hash: Hash,
    data: Vec<u8>,
}

impl TransactionDraft {
    /// Transfer `amount` of `token` to `to`.
    pub fn send(to: Address, token: TokenStandard, amount: Amount) -> Self {
        Self {
            block_type: BlockType::UserSend,
            to_address: to,
            amount,
            token_standard: token,
            from_block_hash: Hash::ZERO,
            data: Vec::new(),
        }
    }

    /// Accept the send block `from_block_hash` addressed to us.
    pub fn receive(from_block_hash: Hash) -> Self {
        Self {
            block_type: BlockType::UserReceive,
            to_address: Address::ZERO,
            amount: Amount::ZERO,
            token_standard: TokenStandard::EMPTY,
            from_block_hash,
            data: Vec::new(),
        }
    }

    /// Call an embedded contract with an ABI payload, attaching `amount` of `token`.
    pub fn contract_call(
        contract: Address,
        token: TokenStandard,
        amount: Amount,
        data: Vec<u8>,
    ) -> Self {
        Self {
            block_type: BlockType::UserSend,
            to_address: contract,
            amount,
            token_standard: token,
            from_block_hash: Hash::ZERO,
            data,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn to_address(&self) -> &Address {
        &self.to_address
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn token_standard(&self) -> &TokenStandard {
        &self.token_standard
    }

    pub fn from_block_hash(&self) -> &Hash {
        &self.from_block_hash
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Structural fields of a block, final once assembly is done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u64,
    pub chain_identifier: u64,
    pub block_type: BlockType,
    pub address: Address,
    pub height: u64,
    pub previous_hash: Hash,
    pub momentum_acknowledged: HashHeight,
    pub to_address: Address,
    pub amount: Amount,
    pub token_standard: TokenStandard,
    pub from_block_hash: Hash,
    pub data: Vec<u8>,
}

/// How a block pays for its inclusion. Exactly one of plasma or work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourcePayment {
    Plasma { fused_plasma: u64 },
    Work { difficulty: u64, nonce: Nonce },
}

impl ResourcePayment {
    pub fn fused_plasma(&self) -> u64 {
        match self {
            ResourcePayment::Plasma { fused_plasma } => *fused_plasma,
            ResourcePayment::Work { .. } => 0,
        }
    }

    pub fn difficulty(&self) -> u64 {
        match self {
            ResourcePayment::Plasma { .. } => 0,
            ResourcePayment::Work { difficulty, .. } => *difficulty,
        }
    }

    pub fn nonce(&self) -> Nonce {
        match self {
            ResourcePayment::Plasma { .. } => Nonce::ZERO,
            ResourcePayment::Work { nonce, .. } => *nonce,
        }
    }

    pub fn is_work(&self) -> bool {
        matches!(self, ResourcePayment::Work { .. })
    }
}

/// A block with its chain position and momentum acknowledgment filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledBlock {
    header: BlockHeader,
}

impl AssembledBlock {
    pub(crate) fn new(header: BlockHeader) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Fix the digest over the final structural fields.
    pub fn hash(self) -> HashedBlock {
        let digest = crate::digest::block_digest(&self.header);
        HashedBlock {
            header: self.header,
            digest,
        }
    }
}

/// A block whose digest is fixed. Resource resolution and signing both work on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedBlock {
    header: BlockHeader,
    digest: Hash,
}

impl HashedBlock {
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn digest(&self) -> &Hash {
        &self.digest
    }

    pub(crate) fn with_payment(self, payment: ResourcePayment) -> ResolvedBlock {
        ResolvedBlock {
            header: self.header,
            digest: self.digest,
            payment,
        }
    }
}

/// A block whose plasma-or-work payment is settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedBlock {
    header: BlockHeader,
    digest: Hash,
    payment: ResourcePayment,
}

impl ResolvedBlock {
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn digest(&self) -> &Hash {
        &self.digest
    }

    pub fn payment(&self) -> &ResourcePayment {
        &self.payment
    }

    pub(crate) fn with_signature(self, public_key: PublicKey, signature: Signature) -> SignedBlock {
        SignedBlock {
            header: self.header,
            digest: self.digest,
            payment: self.payment,
            public_key,
            signature,
        }
    }
}

/// A fully authorized block, ready to publish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedBlock {
    header: BlockHeader,
    digest: Hash,
    payment: ResourcePayment,
    public_key: PublicKey,
    signature: Signature,
}

impl SignedBlock {
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn digest(&self) -> &Hash {
        &self.digest
    }

    pub fn payment(&self) -> &ResourcePayment {
        &self.payment
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The wire form accepted by `ledger.publishRawTransaction`.
    pub fn to_account_block(&self) -> AccountBlock {
        let h = &self.header;
        AccountBlock {
            version: h.version,
            chain_identifier: h.chain_identifier,
            block_type: h.block_type,
            hash: self.digest,
            previous_hash: h.previous_hash,
            height: h.height,
            momentum_acknowledged: h.momentum_acknowledged,
            address: h.address,
            to_address: h.to_address,
            amount: h.amount,
            token_standard: h.token_standard,
            from_block_hash: h.from_block_hash,
            descendant_blocks: Vec::new(),
            data: h.data.clone(),
            fused_plasma: self.payment.fused_plasma(),
            difficulty: self.payment.difficulty(),
            nonce: self.payment.nonce(),
            public_key: self.public_key,
            signature: self.signature,
        }
    }

    pub(crate) fn into_receipt(self) -> PublishedBlock {
        PublishedBlock {
            hash: self.digest,
            height: self.header.height,
            address: self.header.address,
            block_type: self.header.block_type,
            payment: self.payment,
        }
    }
}

/// Receipt for a block the node accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishedBlock {
    pub hash: Hash,
    pub height: u64,
    pub address: Address,
    pub block_type: BlockType,
    pub payment: ResourcePayment,
}
