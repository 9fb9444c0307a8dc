//! Pipeline behaviour against nullable infrastructure.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use znn_nullables::{NullLedger, NullProver, NullSigner};
use znn_transactions::{
    BlockSigner, LedgerError, Pipeline, PipelineOptions, ResourcePayment, Stage,
    TransactionDraft, TransactionError,
};
use znn_types::{Address, Amount, Hash, HashHeight, Nonce, TokenStandard};
use znn_work::{validate_work, WorkGenerator};

fn send_draft(amount: u128) -> TransactionDraft {
    TransactionDraft::send(Address::new([7; 20]), TokenStandard::ZNN, Amount::new(amount))
}

fn pipeline(ledger: NullLedger) -> Pipeline<NullLedger, NullProver> {
    Pipeline::new(ledger, NullProver::new())
}

#[tokio::test]
async fn first_block_with_plasma() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new().with_plasma(signer.address(), 50_000));

    let receipt = pipeline
        .submit(&signer, send_draft(150_000_000))
        .await
        .unwrap();

    assert_eq!(receipt.height, 1);
    assert_eq!(receipt.payment, ResourcePayment::Plasma { fused_plasma: 21_000 });
    assert_eq!(pipeline.prover().calls(), 0);
    assert_eq!(pipeline.ledger().required_pow_calls(), 0);
    assert_eq!(pipeline.ledger().publish_calls(), 1);

    let published = pipeline.ledger().published();
    let block = &published[0];
    assert_eq!(block.previous_hash, Hash::ZERO);
    assert_eq!(block.height, 1);
    assert_eq!(block.fused_plasma, 21_000);
    assert_eq!(block.difficulty, 0);
    assert_eq!(block.nonce, Nonce::ZERO);
    assert_eq!(block.amount, Amount::new(150_000_000));
    assert_eq!(block.public_key, signer.public_key());
    assert!(znn_crypto::verify_signature(
        block.hash.as_bytes(),
        &block.signature,
        &block.public_key
    ));
}

#[tokio::test]
async fn first_block_without_plasma_pays_with_work() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new().with_required_difficulty(31_500));

    let receipt = pipeline.submit(&signer, send_draft(150_000_000)).await.unwrap();

    assert!(receipt.payment.is_work());
    assert_eq!(receipt.payment.difficulty(), 80_000);
    assert_eq!(pipeline.prover().calls(), 1);
    assert_eq!(pipeline.prover().last_difficulty(), 80_000);

    let block = &pipeline.ledger().published()[0];
    assert_eq!(block.fused_plasma, 0);
    assert_eq!(block.difficulty, 80_000);
    assert_eq!(block.nonce, NullProver::DEFAULT_NONCE);
    assert_ne!(block.signature, Default::default());
}

#[tokio::test]
async fn network_difficulty_above_default_wins() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(
        NullLedger::new()
            .with_plasma(signer.address(), 20_999)
            .with_required_difficulty(120_000),
    );

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(receipt.payment.difficulty(), 120_000);
    assert_eq!(pipeline.ledger().required_pow_calls(), 1);
}

#[tokio::test]
async fn custom_plasma_requirement_is_honoured() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new().with_plasma(signer.address(), 50_000))
        .with_options(PipelineOptions {
            required_plasma: Some(42_000),
            ..PipelineOptions::default()
        });

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(receipt.payment.fused_plasma(), 42_000);
}

#[tokio::test]
async fn zero_plasma_requirement_never_publishes_an_unpaid_block() {
    let signer = NullSigner::from_seed(1);
    let options = PipelineOptions {
        required_plasma: Some(0),
        ..PipelineOptions::default()
    };
    let pipeline = pipeline(NullLedger::new()).with_options(options);

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(options.plasma_requirement(), 21_000);
    assert!(receipt.payment.is_work());
    assert_eq!(receipt.payment.difficulty(), 80_000);
    let block = &pipeline.ledger().published()[0];
    assert_eq!(block.fused_plasma, 0);
    assert_eq!(block.difficulty, 80_000);
}

#[tokio::test]
async fn zero_plasma_requirement_fuses_the_protocol_minimum() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new().with_plasma(signer.address(), 30_000))
        .with_options(PipelineOptions {
            required_plasma: Some(0),
            ..PipelineOptions::default()
        });

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(receipt.payment, ResourcePayment::Plasma { fused_plasma: 21_000 });
}

#[tokio::test]
async fn zero_default_difficulty_still_demands_work() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new()).with_options(PipelineOptions {
        default_difficulty: 0,
        ..PipelineOptions::default()
    });

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(receipt.payment.difficulty(), 80_000);
    assert_eq!(pipeline.prover().last_difficulty(), 80_000);
    assert_eq!(pipeline.ledger().published()[0].difficulty, 80_000);
}

#[tokio::test]
async fn plasma_query_failure_falls_back_to_default_work() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(
        NullLedger::new()
            .failing_plasma(LedgerError::Transport("timed out".into()))
            .with_required_difficulty(500_000),
    );

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(receipt.payment.difficulty(), 80_000);
    assert_eq!(pipeline.ledger().plasma_calls(), 1);
    assert_eq!(pipeline.ledger().required_pow_calls(), 0);
    assert_eq!(pipeline.ledger().publish_calls(), 1);
}

#[tokio::test]
async fn required_pow_failure_uses_default_difficulty() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(
        NullLedger::new().failing_required_pow(LedgerError::Rpc {
            code: -32000,
            message: "unavailable".into(),
        }),
    );

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(receipt.payment.difficulty(), 80_000);
    assert_eq!(pipeline.ledger().required_pow_calls(), 1);
}

#[tokio::test]
async fn extends_existing_chain() {
    let signer = NullSigner::from_seed(2);
    let prior = Hash::new([0xAA; 32]);
    let momentum = HashHeight::new(Hash::new([0xBB; 32]), 5_000);
    let pipeline = pipeline(
        NullLedger::new()
            .with_frontier(signer.address(), HashHeight::new(prior, 7))
            .with_momentum(momentum),
    );

    let receipt = pipeline.submit(&signer, send_draft(1)).await.unwrap();

    assert_eq!(receipt.height, 8);
    let block = &pipeline.ledger().published()[0];
    assert_eq!(block.previous_hash, prior);
    assert_eq!(block.momentum_acknowledged, momentum);
    assert_eq!(block.address, signer.address());
}

#[tokio::test]
async fn receive_references_source_block() {
    let signer = NullSigner::from_seed(3);
    let source = Hash::new([0x11; 32]);
    let pipeline = pipeline(NullLedger::new());

    pipeline
        .submit(&signer, TransactionDraft::receive(source))
        .await
        .unwrap();

    let block = &pipeline.ledger().published()[0];
    assert_eq!(block.from_block_hash, source);
    assert_eq!(block.amount, Amount::ZERO);
    assert_eq!(block.block_type.code(), 3);
}

#[tokio::test]
async fn assembly_failure_aborts_before_anything_else() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(
        NullLedger::new().failing_momentum(LedgerError::Transport("refused".into())),
    );

    let err = pipeline.submit(&signer, send_draft(1)).await.unwrap_err();

    assert_eq!(err.stage, Stage::Assemble);
    assert!(matches!(err.source, TransactionError::QueryFailure(_)));
    assert_eq!(pipeline.ledger().plasma_calls(), 0);
    assert_eq!(pipeline.ledger().publish_calls(), 0);
    assert_eq!(signer.calls(), 0);
}

#[tokio::test]
async fn frontier_failure_is_a_query_failure() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(
        NullLedger::new().failing_frontier(LedgerError::Decode("bad json".into())),
    );

    let err = pipeline.submit(&signer, send_draft(1)).await.unwrap_err();

    assert_eq!(err.stage, Stage::Assemble);
    assert_eq!(pipeline.ledger().momentum_calls(), 0);
}

#[tokio::test]
async fn signing_failure_publishes_nothing() {
    let signer = NullSigner::failing(1, "hardware wallet disconnected");
    let pipeline = pipeline(NullLedger::new());

    let err = pipeline.submit(&signer, send_draft(1)).await.unwrap_err();

    assert_eq!(err.stage, Stage::Sign);
    assert!(
        matches!(&err.source, TransactionError::SigningFailure(r) if r == "hardware wallet disconnected")
    );
    assert_eq!(pipeline.ledger().publish_calls(), 0);
}

#[tokio::test]
async fn proof_failure_publishes_nothing() {
    let signer = NullSigner::from_seed(1);
    let pipeline = Pipeline::new(NullLedger::new(), NullProver::exhausted());

    let err = pipeline.submit(&signer, send_draft(1)).await.unwrap_err();

    assert_eq!(err.stage, Stage::Resolve);
    assert!(matches!(err.source, TransactionError::ProofFailure(_)));
    assert_eq!(signer.calls(), 0);
    assert_eq!(pipeline.ledger().publish_calls(), 0);
}

#[tokio::test]
async fn node_rejection_is_reported() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new().failing_publish(LedgerError::Rpc {
        code: -32000,
        message: "insufficient balance".into(),
    }));

    let err = pipeline.submit(&signer, send_draft(1)).await.unwrap_err();

    assert_eq!(err.stage, Stage::Publish);
    assert!(
        matches!(&err.source, TransactionError::RejectedByNetwork(m) if m == "insufficient balance")
    );
    assert_eq!(pipeline.ledger().publish_calls(), 1);
    assert!(pipeline.ledger().published().is_empty());
}

#[tokio::test]
async fn broken_connection_is_a_transport_failure() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(
        NullLedger::new().failing_publish(LedgerError::Transport("connection reset".into())),
    );

    let err = pipeline.submit(&signer, send_draft(1)).await.unwrap_err();

    assert_eq!(err.stage, Stage::Publish);
    assert!(matches!(err.source, TransactionError::TransportFailure(_)));
}

#[tokio::test]
async fn cancelled_token_stops_before_assembly() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = pipeline
        .submit_with_cancel(&signer, send_draft(1), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.stage, Stage::Assemble);
    assert_eq!(pipeline.ledger().frontier_calls(), 0);
}

#[tokio::test]
async fn cancel_during_proof_of_work() {
    let signer = NullSigner::from_seed(1);
    let pipeline = Pipeline::new(NullLedger::new(), NullProver::blocking());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = pipeline
        .submit_with_cancel(&signer, send_draft(1), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.stage, Stage::Resolve);
    assert_eq!(signer.calls(), 0);
    assert_eq!(pipeline.ledger().publish_calls(), 0);
}

#[tokio::test]
async fn timeout_cancels_stuck_work() {
    let signer = NullSigner::from_seed(1);
    let pipeline = Pipeline::new(NullLedger::new(), NullProver::blocking());

    let started = Instant::now();
    let err = pipeline
        .submit_with_timeout(&signer, send_draft(1), Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(pipeline.ledger().published().is_empty());
}

#[tokio::test]
async fn timeout_longer_than_work_is_harmless() {
    let signer = NullSigner::from_seed(1);
    let pipeline = pipeline(NullLedger::new());

    let receipt = pipeline
        .submit_with_timeout(&signer, send_draft(1), Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(receipt.height, 1);
}

#[tokio::test]
async fn batch_chains_heights() {
    let signer = NullSigner::from_seed(4);
    let pipeline = pipeline(NullLedger::new());

    let receipts = pipeline
        .submit_all(&signer, vec![send_draft(1), send_draft(2), send_draft(3)])
        .await
        .unwrap();

    let heights: Vec<u64> = receipts.iter().map(|r| r.height).collect();
    assert_eq!(heights, vec![1, 2, 3]);
    let published = pipeline.ledger().published();
    assert_eq!(published[1].previous_hash, published[0].hash);
    assert_eq!(published[2].previous_hash, published[1].hash);
}

#[tokio::test]
async fn batch_stops_at_first_failure() {
    let signer = NullSigner::from_seed(4);
    let pipeline = pipeline(
        NullLedger::new().failing_publish_after(2, LedgerError::Transport("gone".into())),
    );

    let err = pipeline
        .submit_all(
            &signer,
            vec![send_draft(1), send_draft(2), send_draft(3), send_draft(4)],
        )
        .await
        .unwrap_err();

    assert_eq!(err.published.len(), 2);
    assert_eq!(err.error.stage, Stage::Publish);
    assert_eq!(pipeline.ledger().publish_calls(), 3);
    assert!(err.to_string().contains("2 block(s) published"));
}

#[tokio::test]
async fn batch_timeout_cancels_stuck_work() {
    let signer = NullSigner::from_seed(4);
    let pipeline = Pipeline::new(NullLedger::new(), NullProver::blocking());

    let started = Instant::now();
    let err = pipeline
        .submit_all_with_timeout(
            &signer,
            vec![send_draft(1), send_draft(2)],
            Duration::from_millis(50),
        )
        .await
        .unwrap_err();

    assert!(err.published.is_empty());
    assert!(err.error.is_cancelled());
    assert_eq!(err.error.stage, Stage::Resolve);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(pipeline.ledger().publish_calls(), 0);
}

#[tokio::test]
async fn batch_timeout_longer_than_work_is_harmless() {
    let signer = NullSigner::from_seed(4);
    let pipeline = pipeline(NullLedger::new());

    let receipts = pipeline
        .submit_all_with_timeout(
            &signer,
            vec![send_draft(1), send_draft(2)],
            Duration::from_secs(30),
        )
        .await
        .unwrap();

    assert_eq!(receipts.len(), 2);
    assert_eq!(receipts[1].height, 2);
}

#[tokio::test]
async fn concurrent_submissions_from_one_account_do_not_collide() {
    let signer = NullSigner::from_seed(5);
    let pipeline = pipeline(NullLedger::new().with_latency(Duration::from_millis(5)));

    let (a, b) = tokio::join!(
        pipeline.submit(&signer, send_draft(1)),
        pipeline.submit(&signer, send_draft(2)),
    );

    let mut heights = vec![a.unwrap().height, b.unwrap().height];
    heights.sort_unstable();
    assert_eq!(heights, vec![1, 2]);
}

#[tokio::test]
async fn different_accounts_proceed_independently() {
    let first = NullSigner::from_seed(6);
    let second = NullSigner::from_seed(7);
    let pipeline = pipeline(NullLedger::new().with_latency(Duration::from_millis(5)));

    let (a, b) = tokio::join!(
        pipeline.submit(&first, send_draft(1)),
        pipeline.submit(&second, send_draft(1)),
    );

    assert_eq!(a.unwrap().height, 1);
    assert_eq!(b.unwrap().height, 1);
}

#[tokio::test]
async fn real_work_generator_produces_valid_nonce() {
    let signer = NullSigner::from_seed(8);
    let pipeline = Pipeline::new(NullLedger::new(), WorkGenerator::default());

    pipeline.submit(&signer, send_draft(1)).await.unwrap();

    let block = &pipeline.ledger().published()[0];
    assert_eq!(block.difficulty, 80_000);
    assert!(validate_work(&block.hash, &block.nonce, block.difficulty));
}
