//! Reconcile - 失敗したジョブ名と成功したジョブ名の突き合わせ
//!
//! 同じ名前で再投入して成功していれば「直った」とみなす。
//! batch サービスは約 24 時間で履歴を消すので、外部で保存した名前リストも
//! 同じ集合演算に混ぜられるようにしている。

use std::collections::BTreeSet;

use crate::domain::JobName;

/// Failed names that never succeeded: `failed - succeeded`, deduplicated and
/// sorted.
pub fn failed_not_succeeded<F, S>(failed: F, succeeded: S) -> Vec<JobName>
where
    F: IntoIterator<Item = JobName>,
    S: IntoIterator<Item = JobName>,
{
    let succeeded: BTreeSet<JobName> = succeeded.into_iter().collect();
    failed
        .into_iter()
        .filter(|name| !succeeded.contains(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Parse an externally kept name list: one name per line, surrounding
/// whitespace trimmed, blank lines and `#` comments skipped.
pub fn parse_name_list(text: &str) -> Vec<JobName> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(JobName::new)
        .collect()
}
