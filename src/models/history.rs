use crate::models::record::PracticeRecord;

/// 练习历史记录
///
/// 最新的记录总在最前面；只支持在头部插入，没有去重、容量上限或删除
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    records: Vec<PracticeRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一条新记录到最前面
    pub fn prepend(&mut self, record: PracticeRecord) {
        self.records.insert(0, record);
    }

    /// 所有记录，最新在前
    pub fn records(&self) -> &[PracticeRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&PracticeRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PracticeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
