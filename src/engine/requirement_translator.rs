// ==========================================
// 木材生产排班计划 - 需求换算引擎
// ==========================================
// 职责: 需求长度 → 投料长度 / 投料体积 / 设备工时
// 公式:
//   adjusted_length = requested_length / yield_ratio
//   required_volume = adjusted_length * volume_per_unit_length
//   required_hours  = adjusted_length / (speed * 60 * availability)
// ==========================================

use crate::domain::production::{ItemSpec, Requirement, ThroughputSpec};
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// RequirementTranslator - 需求换算引擎
// ==========================================
pub struct RequirementTranslator {
    // 无状态引擎
}

impl Default for RequirementTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementTranslator {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验设备产能参数
    pub fn validate_throughput(&self, throughput: &ThroughputSpec) -> EngineResult<()> {
        let ThroughputSpec {
            speed,
            availability_fraction,
        } = *throughput;

        let valid = speed.is_finite()
            && availability_fraction.is_finite()
            && speed > 0.0
            && availability_fraction > 0.0
            && availability_fraction <= 1.0;

        if valid {
            Ok(())
        } else {
            Err(EngineError::InvalidThroughput {
                speed,
                availability_fraction,
            })
        }
    }

    /// 换算单个工单需求
    ///
    /// # 错误
    /// - InvalidThroughput: speed <= 0 或 availability 不在 (0, 1]
    /// - InvalidRequest: 需求长度为负/非有限值, 或每米体积 <= 0
    /// - InvalidYield: yield_ratio <= 0 且需求长度 > 0
    pub fn translate(
        &self,
        requested_length: f64,
        yield_ratio: f64,
        volume_per_unit_length: f64,
        speed: f64,
        availability_fraction: f64,
    ) -> EngineResult<Requirement> {
        let throughput = ThroughputSpec::new(speed, availability_fraction);
        self.validate_throughput(&throughput)?;

        if !requested_length.is_finite() || requested_length < 0.0 {
            return Err(EngineError::InvalidRequest(format!(
                "需求长度必须为非负数: {}",
                requested_length
            )));
        }
        if !volume_per_unit_length.is_finite() || volume_per_unit_length <= 0.0 {
            return Err(EngineError::InvalidRequest(format!(
                "每米体积必须为正数: {}",
                volume_per_unit_length
            )));
        }

        if requested_length == 0.0 {
            return Ok(Requirement::zero(yield_ratio.max(0.0)));
        }

        if !yield_ratio.is_finite() || yield_ratio <= 0.0 {
            return Err(EngineError::InvalidYield {
                yield_ratio,
                requested_length,
            });
        }

        let adjusted_length = requested_length / yield_ratio;
        let required_volume = adjusted_length * volume_per_unit_length;
        let required_hours = adjusted_length / throughput.effective_length_per_hour();

        Ok(Requirement {
            requested_length,
            yield_ratio,
            adjusted_length,
            required_volume,
            required_hours,
        })
    }

    /// 按领域对象换算
    pub fn translate_item(
        &self,
        requested_length: f64,
        yield_ratio: f64,
        item: &ItemSpec,
        throughput: &ThroughputSpec,
    ) -> EngineResult<Requirement> {
        self.translate(
            requested_length,
            yield_ratio,
            item.volume_per_unit_length,
            throughput.speed,
            throughput.availability_fraction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YIELD_19X75: f64 = 31.999 / 54.288;

    #[test]
    fn test_reference_example() {
        let req = RequirementTranslator::new()
            .translate(1000.0, YIELD_19X75, 0.001, 70.0, 0.85)
            .unwrap();

        assert!((req.adjusted_length - 1696.55).abs() < 0.5);
        assert!((req.required_volume - req.adjusted_length * 0.001).abs() < 1e-12);
        assert!((req.required_volume - 1.695).abs() < 0.01);
        assert!(
            (req.required_hours - req.adjusted_length / (70.0 * 60.0 * 0.85)).abs() < 1e-12
        );
        assert!((req.required_hours - 0.4752).abs() < 1e-3);
    }

    #[test]
    fn test_zero_yield_fails_for_nonzero_request() {
        let err = RequirementTranslator::new()
            .translate(100.0, 0.0, 0.001, 70.0, 0.85)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidYield { .. }));
    }

    #[test]
    fn test_zero_request_with_zero_yield_is_empty_requirement() {
        let req = RequirementTranslator::new()
            .translate(0.0, 0.0, 0.001, 70.0, 0.85)
            .unwrap();
        assert_eq!(req.adjusted_length, 0.0);
        assert_eq!(req.required_hours, 0.0);
    }

    #[test]
    fn test_invalid_throughput() {
        let t = RequirementTranslator::new();
        assert!(matches!(
            t.translate(100.0, 0.5, 0.001, 0.0, 0.85),
            Err(EngineError::InvalidThroughput { .. })
        ));
        assert!(matches!(
            t.translate(100.0, 0.5, 0.001, 70.0, 0.0),
            Err(EngineError::InvalidThroughput { .. })
        ));
        assert!(matches!(
            t.translate(100.0, 0.5, 0.001, 70.0, 1.5),
            Err(EngineError::InvalidThroughput { .. })
        ));
        assert!(matches!(
            t.translate(100.0, 0.5, 0.001, -70.0, 0.5),
            Err(EngineError::InvalidThroughput { .. })
        ));
    }

    #[test]
    fn test_invalid_request() {
        let t = RequirementTranslator::new();
        assert!(matches!(
            t.translate(-1.0, 0.5, 0.001, 70.0, 0.85),
            Err(EngineError::InvalidRequest(_))
        ));
        assert!(matches!(
            t.translate(10.0, 0.5, 0.0, 70.0, 0.85),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    // ==========================================
    // 单调性: 每组只改变一个参数
    // ==========================================

    fn base() -> (f64, f64, f64, f64, f64) {
        (1000.0, 0.6, 0.002, 70.0, 0.85)
    }

    fn run(p: (f64, f64, f64, f64, f64)) -> Requirement {
        RequirementTranslator::new()
            .translate(p.0, p.1, p.2, p.3, p.4)
            .unwrap()
    }

    fn strictly_greater(a: &Requirement, b: &Requirement) -> bool {
        a.adjusted_length > b.adjusted_length
            && a.required_volume > b.required_volume
            && a.required_hours > b.required_hours
    }

    #[test]
    fn test_monotonic_in_requested_length() {
        let lo = run(base());
        let hi = run((2000.0, base().1, base().2, base().3, base().4));
        assert!(strictly_greater(&hi, &lo));
    }

    #[test]
    fn test_monotonic_decreasing_in_yield() {
        let lo_yield = run(base());
        let hi_yield = run((base().0, 0.9, base().2, base().3, base().4));
        assert!(strictly_greater(&lo_yield, &hi_yield));
    }

    #[test]
    fn test_monotonic_decreasing_in_speed_and_availability() {
        let slow = run(base());
        let fast = run((base().0, base().1, base().2, 90.0, base().4));
        assert!(slow.required_hours > fast.required_hours);
        assert_eq!(slow.adjusted_length, fast.adjusted_length);

        let low_avail = run(base());
        let high_avail = run((base().0, base().1, base().2, base().3, 1.0));
        assert!(low_avail.required_hours > high_avail.required_hours);
    }
}
