//! # `rguard demo` — End-to-End Admission Flow
//!
//! Stands up an in-process ledger hosting a fresh admission program, sets
//! a region capacity as the genesis admin, then drives the full client
//! workflow: identity binding, oracle resolution, eligibility check, proof
//! generation, submission, and finality wait. Mirrors what an integration
//! environment does against a real deployment.

use anyhow::Context;
use clap::Args;
use url::Url;

use rguard_client::{
    AdmissionOutcome, ClientConfig, CredentialSource, DigestProofProducer, InProcessLedger,
    MembershipClient, StaticDirectory, StaticOracle, ORACLE_SERVICE,
};
use rguard_core::{Address, RegionCode};
use rguard_program::{AdmissionProgram, DigestProofVerifier};

/// Arguments for the `demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Region code to admit into.
    #[arg(long, default_value = "NG")]
    pub region: String,

    /// Capacity to set for the region before joining.
    #[arg(long, default_value_t = 10)]
    pub capacity: u64,
}

/// Run the `demo` subcommand.
pub async fn run(args: &DemoArgs) -> anyhow::Result<()> {
    let code = RegionCode::new(&args.region).context("region code rejected")?;
    let region_id = code.region_id();

    // Deploy: a fresh program behind an in-process ledger, with the demo
    // operator as genesis admin.
    let admin = Address::from_public_key_bytes(b"rguard-demo-admin");
    let ledger = InProcessLedger::new(AdmissionProgram::new(DigestProofVerifier, admin), 2);
    ledger
        .program()
        .lock()
        .set_capacity(admin, region_id, args.capacity)
        .map_err(|e| anyhow::anyhow!("capacity setup failed: {e}"))?;
    println!("capacity set: {code} -> {}", args.capacity);

    // Client side: a generated signer, allowlisted on the demo oracle.
    let credentials = CredentialSource::generate();
    let identity = credentials
        .resolve_address()
        .context("embedded signer did not resolve")?;
    let oracle_url = Url::parse("http://oracle.demo.internal/")?;
    let config = ClientConfig::new(
        Url::parse("http://ledger.demo.internal/")?,
        Url::parse("http://directory.demo.internal/")?,
    );
    let mut client = MembershipClient::new(
        config,
        credentials,
        StaticDirectory::new().with_entry(ORACLE_SERVICE, oracle_url),
        StaticOracle::new().allow(identity),
        DigestProofProducer,
        ledger.clone(),
    );

    println!("user: {identity}");
    let eligible = client.check_eligibility().await?;
    println!("network status: {}", if eligible { "verified" } else { "not verified" });

    println!("joining region {code}...");
    let receipt = client.join_region(code.as_str()).await?;
    match receipt.outcome {
        AdmissionOutcome::Admitted { sequence, .. } => {
            println!("admission granted (sequence {sequence})");
        }
        AdmissionOutcome::AlreadyAdmitted => {
            println!("already a member; nothing to do");
        }
    }

    let program = ledger.program();
    let program = program.lock();
    println!(
        "member count for {code}: {}/{}",
        program.occupancy(&region_id),
        program.capacity(&region_id)
    );
    Ok(())
}
