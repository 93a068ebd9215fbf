//! Evidence invalidation
//!
//! Reverting a contract payment to Draft deletes every attached document.
//! Deletion is best effort: each failure is retried, then reported as a
//! warning, and never undoes the committed status change.

use super::ports::DocumentStore;
use futures::future::join_all;
use shared::contract::{ContractPayment, Document, SideEffect, SideEffectWarning};

/// Delete intent emitted by every reject
pub fn invalidation_effect(contract: &ContractPayment) -> SideEffect {
    SideEffect::DeleteDocuments {
        contract_id: contract.id.clone(),
        side: contract.side,
    }
}

/// Delete all documents of a contract payment, retrying each failure
/// `retries` times
pub async fn purge_documents(
    store: &dyn DocumentStore,
    contract_id: &str,
    retries: u32,
) -> Vec<SideEffectWarning> {
    let documents = match store.list_documents(contract_id).await {
        Ok(documents) => documents,
        Err(e) => {
            tracing::warn!(contract_id, error = %e, "Failed to list documents for invalidation");
            return vec![SideEffectWarning::DocumentListFailed {
                contract_id: contract_id.to_string(),
                message: e.to_string(),
            }];
        }
    };

    if documents.is_empty() {
        return Vec::new();
    }

    let results = join_all(
        documents
            .iter()
            .map(|document| delete_with_retry(store, document, retries)),
    )
    .await;

    let warnings: Vec<_> = results.into_iter().flatten().collect();
    tracing::info!(
        contract_id,
        deleted = documents.len() - warnings.len(),
        failed = warnings.len(),
        "Contract documents invalidated"
    );
    warnings
}

async fn delete_with_retry(
    store: &dyn DocumentStore,
    document: &Document,
    retries: u32,
) -> Option<SideEffectWarning> {
    let attempts = retries + 1;
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match store.delete_document(&document.id).await {
            Ok(()) => return None,
            Err(e) => {
                tracing::warn!(
                    contract_id = %document.contract_id,
                    document_id = %document.id,
                    attempt,
                    error = %e,
                    "Document deletion failed"
                );
                last_error = e.to_string();
            }
        }
    }

    Some(SideEffectWarning::DocumentDeleteFailed {
        contract_id: document.contract_id.clone(),
        document_id: document.id.clone(),
        attempts,
        message: last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::storage::InMemoryDocumentStore;
    use shared::contract::{ContractSide, DocumentKind, NewDocument};

    fn new_document(contract_id: &str, kind: DocumentKind) -> NewDocument {
        NewDocument {
            contract_id: contract_id.to_string(),
            side: ContractSide::Client,
            document_type_id: format!("type-{kind:?}"),
            kind,
            url: format!("https://files.example/{contract_id}/{kind:?}.pdf"),
            file_name: None,
        }
    }

    #[tokio::test]
    async fn test_purge_deletes_only_target_contract() {
        let store = InMemoryDocumentStore::new();
        store
            .create_document_record(new_document("c-1", DocumentKind::StatementOfWork))
            .await
            .unwrap();
        store
            .create_document_record(new_document("c-1", DocumentKind::Timesheet))
            .await
            .unwrap();
        store
            .create_document_record(new_document("c-2", DocumentKind::StatementOfWork))
            .await
            .unwrap();

        let warnings = purge_documents(&store, "c-1", 1).await;

        assert!(warnings.is_empty());
        assert!(store.list_documents("c-1").await.unwrap().is_empty());
        assert_eq!(store.list_documents("c-2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_purge_without_documents_is_noop() {
        let store = InMemoryDocumentStore::new();
        assert!(purge_documents(&store, "c-1", 1).await.is_empty());
    }

    #[test]
    fn test_invalidation_effect_targets_contract() {
        let contract = ContractPayment::new("c-1", ContractSide::Client, "pp", "ta", "CC-1");
        assert_eq!(
            invalidation_effect(&contract),
            SideEffect::DeleteDocuments {
                contract_id: "c-1".into(),
                side: ContractSide::Client,
            }
        );
    }
}
