// ==========================================
// 保管箱排布表转换工具 - 宽深补全
// ==========================================
// 命中参考表 → 取 (Width, Depth)
// 未命中 → 默认宽深 + 每条记录一次告警
// ==========================================

use crate::domain::{Record, ReferenceMap, TransformWarning, TypeAttributes};
use tracing::warn;

pub struct Enricher<'a> {
    reference: &'a ReferenceMap,
    fallback: TypeAttributes,
}

impl<'a> Enricher<'a> {
    pub fn new(reference: &'a ReferenceMap, fallback: TypeAttributes) -> Self {
        Self {
            reference,
            fallback,
        }
    }

    /// 就地补全, 返回告警
    pub fn enrich(&self, records: &mut [Record]) -> Vec<TransformWarning> {
        let mut warnings = Vec::new();
        for record in records.iter_mut() {
            let attributes = match self.reference.get(&record.type_label) {
                Some(attributes) => attributes,
                None => {
                    warn!(
                        type_label = %record.type_label,
                        nst = record.nst,
                        nsafe = record.nsafe,
                        "类型不在参考表中, 使用默认宽深"
                    );
                    warnings.push(TransformWarning::UnmappedType {
                        type_label: record.type_label.clone(),
                        nst: record.nst,
                        nsafe: record.nsafe,
                    });
                    self.fallback
                }
            };
            record.attributes = Some(attributes);
        }
        warnings
    }
}
