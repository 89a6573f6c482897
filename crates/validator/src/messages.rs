//! Message catalog for the built-in rules.
//!
//! Templates use `{n}`, `{min}` and `{max}` placeholders. Any template left
//! out of a deserialized catalog falls back to the English text.

use serde::{Deserialize, Serialize};

/// Failure messages of the built-in rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// `required` on a typed input.
    pub required_text: String,
    /// `required` on a select, radio or checkbox.
    pub required_choice: String,
    /// `minlength`; `{n}` is the declared count.
    pub minlength: String,
    /// `maxlength`; `{n}` is the declared count.
    pub maxlength: String,
    pub email: String,
    pub phone: String,
    pub tel: String,
    /// Value is not a number.
    pub number: String,
    /// Value is not all digits.
    pub integer: String,
    /// Below the declared lower bound; `{min}` is the bound.
    pub min_value: String,
    /// Above the declared upper bound; `{max}` is the bound.
    pub max_value: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    /// English catalog.
    #[must_use]
    pub fn english() -> Self {
        Self {
            required_text: "please fill in this field".into(),
            required_choice: "please select".into(),
            minlength: "please enter at least {n} characters".into(),
            maxlength: "please enter at most {n} characters".into(),
            email: "invalid email format".into(),
            phone: "invalid phone format".into(),
            tel: "invalid telephone format".into(),
            number: "please enter a number".into(),
            integer: "please enter an integer".into(),
            min_value: "minimum value is {min}".into(),
            max_value: "maximum value is {max}".into(),
        }
    }

    /// Simplified Chinese catalog.
    #[must_use]
    pub fn chinese() -> Self {
        Self {
            required_text: "请填写此项".into(),
            required_choice: "请选择".into(),
            minlength: "请最少填写{n}个字".into(),
            maxlength: "请最多填写{n}个字".into(),
            email: "邮箱格式不正确".into(),
            phone: "手机格式不正确".into(),
            tel: "固定电话格式不正确".into(),
            number: "请输入数字".into(),
            integer: "请输入整数".into(),
            min_value: "输入值最小为 {min}".into(),
            max_value: "输入值最大为 {max}".into(),
        }
    }

    pub fn minlength(&self, n: usize) -> String {
        fill(&self.minlength, "n", &n.to_string())
    }

    pub fn maxlength(&self, n: usize) -> String {
        fill(&self.maxlength, "n", &n.to_string())
    }

    pub fn min_value(&self, min: f64) -> String {
        fill(&self.min_value, "min", &min.to_string())
    }

    pub fn max_value(&self, max: f64) -> String {
        fill(&self.max_value, "max", &max.to_string())
    }
}

fn fill(template: &str, key: &str, value: &str) -> String {
    template.replace(&format!("{{{key}}}"), value)
}
