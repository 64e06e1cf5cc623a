//! Prompt templates for Prosno.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub mcq: McqPrompts,
}

/// Prompt for MCQ generation.
///
/// The template has exactly two substitution points, `{n}` (question count)
/// and `{context}` (retrieved passages). The HTML scaffold, the Bengali
/// output language, and the feedback structure are part of the contract the
/// downstream renderer relies on, so edits to a custom template should keep
/// the `data-answer` attribute and the `reveal` handler intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct McqPrompts {
    pub template: String,
}

impl Default for McqPrompts {
    fn default() -> Self {
        Self {
            template: r#"
You must output ONLY valid HTML code.

Generate EXACTLY {n} Bengali MCQs using the reference context below.
Output must contain the following structure exactly (interactive MCQs):

<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>MCQ</title>
<style>
.mcq-list { list-style: none; padding: 0; }
.mcq-item { margin-bottom: 20px; }
.question { font-weight: bold; margin-bottom: 10px; }
.options { list-style: none; padding: 0; }
.options li { margin-bottom: 8px; padding: 6px; cursor: pointer; }
.options li:hover { background: #ddd; }
.feedback { display: none; margin-top: 10px; padding: 10px; background: #f0f0f0; }
</style>
</head>
<body>

<ol class="mcq-list">
  <li class="mcq-item">
    <div class="question">QUESTION_TEXT</div>
    <ul class="options">
      <li onclick="reveal(this, 'a')">a) OPTION_A</li>
      <li onclick="reveal(this, 'b')">b) OPTION_B</li>
      <li onclick="reveal(this, 'c')">c) OPTION_C</li>
      <li onclick="reveal(this, 'd')">d) OPTION_D</li>
    </ul>
    <div class="feedback" data-answer="b">
      <strong>সঠিক উত্তর:</strong> b <br>
      <span class="explanation">EXPLANATION_TEXT</span>
    </div>
  </li>
</ol>

<script>
function reveal(element, option) {
    let item = element.closest('.mcq-item');
    let feedback = item.querySelector('.feedback');
    let correct = feedback.getAttribute('data-answer');
    let opts = item.querySelectorAll('.options li');

    opts.forEach(li => li.style.background = '#eee');

    if(option === correct) {
        element.style.background = '#c8f7c5';
    } else {
        element.style.background = '#f7c5c5';
    }
    feedback.style.display = 'block';
}
</script>

</body>
</html>

### NOW GENERATE:
Replace QUESTION_TEXT, OPTIONS, and EXPLANATION_TEXT for exactly {n} MCQs.
Use this reference context:
{context}
"#
            .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the defaults, with an optional custom directory.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load MCQ prompt if file exists
            let mcq_path = custom_path.join("mcq.toml");
            if mcq_path.exists() {
                let content = std::fs::read_to_string(&mcq_path)?;
                prompts.mcq = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution points are written as `{name}`. Pure string replacement,
    /// no normalization of the substituted values.
    pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{}}}", key), value);
        }
        result
    }
}
