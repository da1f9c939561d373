use anyhow::{Result, bail};
use inspector_core::chain::{Chain, ChainService};
use inspector_eip7702_core::inspector::{BatchSummary, check_delegation, check_delegations};

use crate::{addresses::partition_addresses, cli::CheckArgs, config::InspectorConfig, report};

pub async fn check(args: CheckArgs, config: &InspectorConfig) -> Result<()> {
    let (addresses, rejected) = partition_addresses(&args.addresses);

    for error in &rejected {
        eprintln!("Skipping {error}");
    }

    if addresses.is_empty() {
        bail!("No valid addresses provided");
    }

    let chain = config
        .network_registry()?
        .get_chain(&args.network.network)?;
    let network = chain.network();

    tracing::info!(
        network,
        chain_id = chain.chain_id(),
        addresses = addresses.len(),
        "Checking EIP-7702 delegation"
    );

    if let [address] = addresses.as_slice() {
        let record = check_delegation(&chain, network, *address).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            print!("{}", report::RecordReport(&record));
        }
        return Ok(());
    }

    let concurrency = args.concurrency.unwrap_or(config.batch.concurrency);
    let records = check_delegations(&chain, network, &addresses, concurrency).await;
    let summary = BatchSummary::from_records(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}", report::RecordReport(record));
        }
        println!("{}", report::SummaryReport(&summary));
    }

    Ok(())
}
