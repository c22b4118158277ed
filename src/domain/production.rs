// ==========================================
// 木材生产排班计划 - 生产数据领域模型
// ==========================================
// 职责: 历史良率记录、品规参数、设备产能、需求换算结果
// 红线: 纯数据, 不含计算逻辑
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// BatchYieldRecord - 历史产出记录
// ==========================================
// 一行历史生产数据, 同一 batch_id 会有多行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchYieldRecord {
    pub batch_id: String,      // 批次/规格 (如 "19x75")
    pub quality_grade: String, // 质量等级 (Q1..Q5 / Waste)
    pub volume: f64,           // 体积 (m3, >= 0)
}

impl BatchYieldRecord {
    pub fn new(batch_id: impl Into<String>, quality_grade: impl Into<String>, volume: f64) -> Self {
        Self {
            batch_id: batch_id.into(),
            quality_grade: quality_grade.into(),
            volume,
        }
    }
}

// ==========================================
// YieldRatio - 批次良率
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldRatio {
    pub qualifying_volume: f64, // 目标等级体积
    pub total_volume: f64,      // 总体积
    pub ratio: f64,             // qualifying / total, total 为 0 时取 0
}

impl YieldRatio {
    /// 良率百分比
    pub fn pct(&self) -> f64 {
        self.ratio * 100.0
    }

    /// 良率为 0 的批次不可排产
    pub fn is_usable(&self) -> bool {
        self.ratio > 0.0
    }
}

// ==========================================
// ItemSpec - 品规参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub volume_per_unit_length: f64, // 每米体积 (m3/m)
}

// ==========================================
// ThroughputSpec - 设备产能
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSpec {
    pub speed: f64,                 // 速度 (m/min)
    pub availability_fraction: f64, // 有效作业率 (0,1]
}

impl ThroughputSpec {
    pub fn new(speed: f64, availability_fraction: f64) -> Self {
        Self {
            speed,
            availability_fraction,
        }
    }

    /// 由百分比 (0~100) 构造
    pub fn from_percent(speed: f64, availability_pct: f64) -> Self {
        Self::new(speed, availability_pct / 100.0)
    }

    /// 每小时有效产出长度
    pub fn effective_length_per_hour(&self) -> f64 {
        self.speed * 60.0 * self.availability_fraction
    }
}

// ==========================================
// WorkItem - 工单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub batch_id: String,      // 规格
    pub requested_length: f64, // 需求长度 (m)
}

impl WorkItem {
    pub fn new(batch_id: impl Into<String>, requested_length: f64) -> Self {
        Self {
            batch_id: batch_id.into(),
            requested_length,
        }
    }
}

// ==========================================
// Requirement - 需求换算结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub requested_length: f64, // 需求长度
    pub yield_ratio: f64,      // 良率
    pub adjusted_length: f64,  // 计入良率损失后的投料长度
    pub required_volume: f64,  // 投料体积
    pub required_hours: f64,   // 设备工时
}

impl Requirement {
    /// 零需求
    pub fn zero(yield_ratio: f64) -> Self {
        Self {
            requested_length: 0.0,
            yield_ratio,
            adjusted_length: 0.0,
            required_volume: 0.0,
            required_hours: 0.0,
        }
    }
}
