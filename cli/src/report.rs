use std::fmt;

use inspector_core::network::NetworkDescriptor;
use inspector_eip7702_core::{
    inspector::{BatchSummary, DelegationRecord},
    transaction::DelegationReceipt,
};

/// Human-readable block for one record
pub struct RecordReport<'a>(pub &'a DelegationRecord);

impl fmt::Display for RecordReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        writeln!(f, "Address:   {}", record.address)?;
        writeln!(f, "Network:   {}", record.network)?;

        if let Some(error) = &record.error {
            writeln!(f, "Status:    ERROR")?;
            return writeln!(f, "Error:     {error}");
        }

        if record.is_delegated {
            writeln!(f, "Status:    DELEGATED")?;
            if let Some(delegated_to) = record.delegated_to {
                writeln!(f, "Delegate:  {delegated_to}")?;
            }
        } else {
            writeln!(f, "Status:    NOT DELEGATED")?;
        }

        if let Some(code) = &record.code {
            writeln!(f, "Code:      {} ({} bytes)", abbreviate(&code.to_string()), code.len())?;
        }
        writeln!(f, "Message:   {}", record.message)
    }
}

pub struct SummaryReport<'a>(pub &'a BatchSummary);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        write!(
            f,
            "Checked {} address(es): {} delegated, {} not delegated, {} error(s)",
            summary.total, summary.delegated, summary.not_delegated, summary.errors
        )
    }
}

pub struct ReceiptReport<'a>(pub &'a DelegationReceipt);

impl fmt::Display for ReceiptReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receipt = self.0;
        writeln!(f, "Transaction: {}", receipt.transaction_hash)?;
        if let Some(block_number) = receipt.block_number {
            writeln!(f, "Block:       {block_number}")?;
        }
        writeln!(
            f,
            "Status:      {}",
            if receipt.success { "success" } else { "reverted" }
        )?;
        let authorization = receipt.authorization.inner();
        writeln!(f, "Authorized:  {}", authorization.address)?;
        writeln!(f, "Auth nonce:  {}", authorization.nonce)
    }
}

/// One aligned row per network
pub struct NetworksReport<'a>(pub &'a [NetworkDescriptor]);

impl fmt::Display for NetworksReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.0.iter().map(|n| n.name.len()).max().unwrap_or(0);
        for (index, network) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<width$}  {:>10}  {}",
                network.name, network.chain_id, network.rpc_url
            )?;
        }
        Ok(())
    }
}

fn abbreviate(hex: &str) -> String {
    const MAX: usize = 66;
    if hex.len() <= MAX {
        hex.to_string()
    } else {
        format!("{}...", &hex[..MAX])
    }
}
