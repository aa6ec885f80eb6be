//! # `rguard derive` — Identifier Derivation
//!
//! Prints the on-ledger identifiers for a region code and, optionally, an
//! identity: the region identifier, and the membership nullifier with its
//! proof transcript. Useful for cross-checking what a client will submit
//! before it submits it.

use anyhow::Context;
use clap::Args;

use rguard_core::{
    membership_nullifier, proof_transcript_digest, Address, ProofContext, RegionCode,
};

/// Arguments for the `derive` subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Region code to derive the identifier for (e.g. NG, US).
    #[arg(long)]
    pub region: String,

    /// Identity to derive the nullifier for (0x-prefixed hex address).
    #[arg(long)]
    pub identity: Option<String>,
}

/// Run the `derive` subcommand.
pub fn run(args: &DeriveArgs) -> anyhow::Result<()> {
    let code = RegionCode::new(&args.region).context("region code rejected")?;
    let region_id = code.region_id();
    println!("region:     {code}");
    println!("region id:  {region_id}");

    if let Some(raw) = &args.identity {
        let identity: Address = raw.parse().context("identity rejected")?;
        let nullifier = membership_nullifier(&identity);
        let transcript = proof_transcript_digest(&ProofContext {
            identity,
            region_id,
            nullifier,
        });
        println!("identity:   {identity}");
        println!("nullifier:  {nullifier}");
        println!("transcript: {transcript}");
    }

    Ok(())
}
