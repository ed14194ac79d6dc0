use crate::domain::model::{EnrichmentOutcome, LookupKind, LookupValue};
use crate::domain::ports::NameLookup;
use crate::utils::error::LookupError;
use std::sync::Arc;
use tokio::sync::mpsc;

/// 並行執行 age / gender / nationality 三個查詢，合併成一個結果。
///
/// 任一查詢失敗就立即回傳該錯誤；其餘仍在執行的查詢不會被取消，
/// 它們完成後送出的結果會被丟棄。
pub struct Enricher<L: NameLookup + 'static> {
    lookup: Arc<L>,
}

impl<L: NameLookup + 'static> Clone for Enricher<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L: NameLookup + 'static> Enricher<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    pub async fn enrich(&self, name: &str) -> Result<EnrichmentOutcome, LookupError> {
        // 容量等於查詢數，送出端永遠不會阻塞
        let (tx, mut rx) = mpsc::channel(LookupKind::ALL.len());

        for kind in LookupKind::ALL {
            let tx = tx.clone();
            let lookup = Arc::clone(&self.lookup);
            let name = name.to_string();

            tokio::spawn(async move {
                let result = run_lookup(lookup.as_ref(), kind, &name).await;
                // 提早失敗後 receiver 已被 drop，send 失敗可忽略
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        let mut age = None;
        let mut gender = None;
        let mut nationality = None;

        for _ in 0..LookupKind::ALL.len() {
            let value = match rx.recv().await {
                Some(Ok(value)) => value,
                Some(Err(e)) => {
                    tracing::warn!(kind = ?e.kind(), "Enrichment for '{}' aborted: {}", name, e);
                    return Err(e);
                }
                None => return Err(LookupError::Interrupted),
            };

            tracing::debug!("Received {} lookup result for '{}'", value.kind(), name);
            match value {
                LookupValue::Age(v) => age = Some(v),
                LookupValue::Gender(v) => gender = Some(v),
                LookupValue::Nationality(v) => nationality = Some(v),
            }
        }

        match (age, gender, nationality) {
            (Some(age), Some(gender), Some(nationality)) => Ok(EnrichmentOutcome {
                age,
                gender,
                nationality,
            }),
            _ => Err(LookupError::Interrupted),
        }
    }
}

async fn run_lookup<L: NameLookup + ?Sized>(
    lookup: &L,
    kind: LookupKind,
    name: &str,
) -> Result<LookupValue, LookupError> {
    match kind {
        LookupKind::Age => lookup.age(name).await.map(LookupValue::Age),
        LookupKind::Gender => lookup.gender(name).await.map(LookupValue::Gender),
        LookupKind::Nationality => lookup.nationality(name).await.map(LookupValue::Nationality),
    }
}
