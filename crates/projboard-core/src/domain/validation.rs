//! Validation - 宣言的な入力チェック
//!
//! `Validatable` に値と制約を積んで `validate()` / `check()` に渡すだけの純粋関数です。
//!
//! # ルール
//! - `required`: 文字列化して trim した結果が空でないこと
//! - `min_length` / `max_length`: テキストのみ。文字数（trim しない）が範囲内（両端含む）
//! - `min` / `max`: 数値のみ。範囲内（両端含む）
//! - 値の種類に合わない制約はスキップ（失敗扱いにしない）

use std::fmt;

/// 検証対象の値
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Text(s) => f.write_str(s),
            InputValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        InputValue::Number(n)
    }
}

impl From<u32> for InputValue {
    fn from(n: u32) -> Self {
        InputValue::Number(f64::from(n))
    }
}

/// 値 + 制約。制約はすべて省略可能で、省略時はチェックしない。
///
/// # 使用例
/// ```
/// use projboard_core::domain::validation::{Validatable, validate};
///
/// let people = Validatable::new(3.0).required().min(1.0).max(5.0);
/// assert!(validate(&people));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: InputValue,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validatable {
    pub fn new(value: impl Into<InputValue>) -> Self {
        Self {
            value: value.into(),
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn min(mut self, n: f64) -> Self {
        self.min = Some(n);
        self
    }

    pub fn max(mut self, n: f64) -> Self {
        self.max = Some(n);
        self
    }
}

/// 最初に失敗したルール
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("a value is required")]
    Required,

    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("must be at least {min} (got {actual})")]
    BelowMin { min: f64, actual: f64 },

    #[error("must be at most {max} (got {actual})")]
    AboveMax { max: f64, actual: f64 },
}

/// ルールを順番に評価し、最初の違反を返す。
pub fn check(input: &Validatable) -> Result<(), Violation> {
    if input.required && input.value.to_string().trim().is_empty() {
        return Err(Violation::Required);
    }

    match &input.value {
        InputValue::Text(s) => {
            let actual = s.chars().count();
            if let Some(min) = input.min_length
                && actual < min
            {
                return Err(Violation::TooShort { min, actual });
            }
            if let Some(max) = input.max_length
                && actual > max
            {
                return Err(Violation::TooLong { max, actual });
            }
        }
        InputValue::Number(n) => {
            let actual = *n;
            // NaN は比較がすべて false になるので `!(a >= b)` の形で書く
            if let Some(min) = input.min
                && !(actual >= min)
            {
                return Err(Violation::BelowMin { min, actual });
            }
            if let Some(max) = input.max
                && !(actual <= max)
            {
                return Err(Violation::AboveMax { max, actual });
            }
        }
    }

    Ok(())
}

/// すべての制約を満たせば true。
pub fn validate(input: &Validatable) -> bool {
    check(input).is_ok()
}
