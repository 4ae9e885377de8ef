use rand::RngCore;
use rand::rngs::OsRng;

/// 一次取样: 归一化随机数及其原始熵
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entropy {
    /// 取值范围 [0, 1)
    pub value: f64,
    pub seed: [u8; 8],
}

impl Entropy {
    pub fn from_seed(seed: [u8; 8]) -> Self {
        Self {
            value: uniform_from_seed(seed),
            seed,
        }
    }

    pub fn seed_hex(&self) -> String {
        format!("{:016x}", u64::from_be_bytes(self.seed))
    }
}

/// 随机源
///
/// 生产环境使用 [`SecureRandom`]; 测试可注入确定性的实现。
pub trait RandomSource {
    fn next_uniform(&mut self) -> Entropy;
}

/// 取高53位作为尾数, 结果严格小于 1.0
pub fn uniform_from_seed(seed: [u8; 8]) -> f64 {
    (u64::from_be_bytes(seed) >> 11) as f64 / (1u64 << 53) as f64
}

pub fn parse_seed(hex: &str) -> Option<[u8; 8]> {
    if hex.len() != 16 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(hex, 16).ok().map(u64::to_be_bytes)
}

/// 操作系统 CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureRandom;

impl RandomSource for SecureRandom {
    fn next_uniform(&mut self) -> Entropy {
        let mut seed = [0u8; 8];
        OsRng.fill_bytes(&mut seed);
        Entropy::from_seed(seed)
    }
}

/// 按顺序重放已记录的种子, 用于审计复现
#[derive(Debug, Clone)]
pub struct ReplayRandom {
    seeds: Vec<[u8; 8]>,
    cursor: usize,
}

impl ReplayRandom {
    /// 任一种子格式错误时返回 None
    pub fn from_hex<S: AsRef<str>>(seeds: &[S]) -> Option<Self> {
        let seeds = seeds
            .iter()
            .map(|s| parse_seed(s.as_ref()))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { seeds, cursor: 0 })
    }

    /// 尚未重放过的种子数, 开始循环后为 0
    pub fn remaining(&self) -> usize {
        self.seeds.len().saturating_sub(self.cursor)
    }
}

impl RandomSource for ReplayRandom {
    /// 种子用尽后循环
    fn next_uniform(&mut self) -> Entropy {
        if self.seeds.is_empty() {
            return Entropy::from_seed([0; 8]);
        }
        let seed = self.seeds[self.cursor % self.seeds.len()];
        self.cursor += 1;
        Entropy::from_seed(seed)
    }
}

/// 固定数值序列 (循环), 测试用
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_uniform(&mut self) -> Entropy {
        let value = if self.values.is_empty() {
            0.0
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        Entropy {
            value: value.clamp(0.0, 1.0 - f64::EPSILON),
            seed: (self.cursor as u64).to_be_bytes(),
        }
    }
}
