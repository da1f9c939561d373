use anyhow::{Context, Result, anyhow, bail};
use inspector_core::{
    chain::{Chain, ChainService, CodeReader, RpcChain},
    credentials::SigningCredential,
    signer::EoaSigner,
};
use inspector_eip7702_core::{
    delegated_account::DelegatedAccount, inspector::DelegationRecord,
    transaction::DelegationTransaction,
};

use crate::{
    cli::{DelegateArgs, NetworkArgs},
    config::InspectorConfig,
    report,
};

pub async fn delegate(args: DelegateArgs, config: &InspectorConfig) -> Result<()> {
    let contract = args
        .contract
        .or(config.delegation.contract)
        .ok_or_else(|| {
            anyhow!("No delegation contract given; pass --contract or set EIP7702__DELEGATION__CONTRACT")
        })?;

    let (credentials, chain) = signer_and_chain(&args.network, config)?;
    let account = DelegatedAccount::new(credentials.address(), chain.clone());

    if chain.get_code(contract).await?.is_empty() {
        tracing::warn!(
            contract = ?contract,
            network = chain.network(),
            "Delegation target has no code on this network"
        );
    }

    if account.is_delegated_to(Some(contract)).await? {
        println!("{} is already delegated to {contract}", account.address());
        return Ok(());
    }

    let transaction = account.delegate_to(contract)?;
    let record = submit(transaction, &credentials, chain).await?;

    if record.delegated_to != Some(contract) {
        bail!(
            "Delegation not visible after confirmation: {}",
            record.message
        );
    }
    Ok(())
}

pub async fn revoke(args: NetworkArgs, config: &InspectorConfig) -> Result<()> {
    let (credentials, chain) = signer_and_chain(&args, config)?;
    let account = DelegatedAccount::new(credentials.address(), chain.clone());

    let current = account.delegation().await?;
    if !current.is_delegated {
        println!("{}", current.message);
        println!("Nothing to revoke for {}", account.address());
        return Ok(());
    }

    let record = submit(account.revoke(), &credentials, chain).await?;

    if record.is_delegated {
        bail!("Delegation still active after revocation: {}", record.message);
    }
    Ok(())
}

fn signer_and_chain(
    network: &NetworkArgs,
    config: &InspectorConfig,
) -> Result<(SigningCredential, RpcChain)> {
    let private_key = config.signer.private_key.as_deref().ok_or_else(|| {
        anyhow!("No signer configured; set EIP7702__SIGNER__PRIVATE_KEY")
    })?;
    let credentials = SigningCredential::from_private_key(private_key)?;
    let chain = config.network_registry()?.get_chain(&network.network)?;
    Ok((credentials, chain))
}

/// Sign, send and confirm, then re-read the account's delegation
async fn submit(
    transaction: DelegationTransaction<RpcChain>,
    credentials: &SigningCredential,
    chain: RpcChain,
) -> Result<DelegationRecord> {
    let transaction = transaction.sign(&EoaSigner::new(), credentials).await?;
    let receipt = transaction
        .send(credentials)
        .await
        .context("Failed to submit authorization transaction")?;

    print!("{}", report::ReceiptReport(&receipt));
    if !receipt.success {
        bail!("Authorization transaction {} reverted", receipt.transaction_hash);
    }

    let record = DelegatedAccount::new(credentials.address(), chain)
        .delegation()
        .await?;
    println!();
    print!("{}", report::RecordReport(&record));
    Ok(record)
}
