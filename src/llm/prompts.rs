//! Prompt templates per content kind.

use serde::{Deserialize, Serialize};

/// Kind of text the language model is asked to write.
///
/// Labels match the `tipo` column of the script table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContentKind {
    #[default]
    Historia,
    Resumen,
    Cuento,
    #[serde(rename = "Fantasía")]
    Fantasia,
    Chisme,
    Curiosidades,
    Datos,
}

impl ContentKind {
    pub const ALL: [ContentKind; 7] = [
        ContentKind::Historia,
        ContentKind::Resumen,
        ContentKind::Cuento,
        ContentKind::Fantasia,
        ContentKind::Chisme,
        ContentKind::Curiosidades,
        ContentKind::Datos,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Historia => "Historia",
            ContentKind::Resumen => "Resumen",
            ContentKind::Cuento => "Cuento",
            ContentKind::Fantasia => "Fantasía",
            ContentKind::Chisme => "Chisme",
            ContentKind::Curiosidades => "Curiosidades",
            ContentKind::Datos => "Datos",
        }
    }

    /// Parse a table label. Unknown labels fall back to `Historia`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        let label = if label.eq_ignore_ascii_case("Fantasia") {
            "Fantasía"
        } else {
            label
        };

        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }

    /// System prompt; `tags` narrow the topic when non-empty.
    pub fn system_prompt(&self, tags: &str) -> String {
        let tags = tags.trim();
        let about = if tags.is_empty() {
            String::new()
        } else {
            format!(" sobre {tags}")
        };

        match self {
            ContentKind::Historia => format!(
                "Eres un creador de historias realistas{about}. Crea historias directamente sin dar títulos ni introducciones, solo el texto de la historia. Sé descriptivo y emotivo."
            ),
            ContentKind::Resumen => format!(
                "Eres un redactor que realiza resúmenes concisos{about}. Proporciona resúmenes directos y al grano, sin introductores ni conclusiones, solo el contenido principal."
            ),
            ContentKind::Cuento => format!(
                "Eres un narrador de cuentos{about}. Crea cuentos directamente sin dar títulos ni aclaraciones, solo la narrativa. Usa un lenguaje colorido y atractivo."
            ),
            ContentKind::Fantasia => format!(
                "Eres un creador de historias de fantasía{about}. Crea mundos imaginarios con elementos mágicos. No añadas títulos ni aclaraciones, solo el texto de la historia."
            ),
            ContentKind::Chisme => format!(
                "Eres un narrador de chismes y rumores{about}. Cuenta historias jugosas y controversiales pero plausibles. No añadas introducciones ni conclusiones, solo el chisme en sí."
            ),
            ContentKind::Curiosidades => format!(
                "Eres un experto en curiosidades{about}. Proporciona datos interesantes y poco conocidos directamente, sin introducción ni preámbulos."
            ),
            ContentKind::Datos => format!(
                "Eres un experto que proporciona datos concretos{about}. Entrega información precisa y concisa sin introducciones ni conclusiones, solo los datos relevantes."
            ),
        }
    }

    pub fn user_prompt(&self, topic: &str) -> String {
        match self {
            ContentKind::Historia => format!(
                "Crea una historia completa sin título, sin introducción, y sin conclusión del tipo 'fin'. Simplemente escribe la historia como tal, debe tener aproximadamente 4 párrafos, sobre: {topic}"
            ),
            ContentKind::Resumen => format!(
                "Haz un resumen completo sin título, sin viñetas, sin puntos numerados, y sin conclusión. Solo el texto directo resumiendo lo siguiente: {topic}"
            ),
            ContentKind::Cuento => format!(
                "Narra un cuento completo sin título, sin moraleja explícita al final, y sin fórmulas como 'érase una vez' o 'colorín colorado'. Solo el texto del cuento sobre: {topic}"
            ),
            ContentKind::Fantasia => format!(
                "Crea una historia de fantasía sin título, sin prólogo ni epílogo. Solo la narrativa directa sobre: {topic}"
            ),
            ContentKind::Chisme => format!(
                "Cuenta un chisme o rumor jugoso sin introducción tipo 'te cuento que' ni conclusión. Solo la información directa sobre: {topic}"
            ),
            ContentKind::Curiosidades => format!(
                "Proporciona 3-4 curiosidades interesantes sin títulos, sin numeración, y sin frases como 'sabías que'. Solo la información directa sobre: {topic}"
            ),
            ContentKind::Datos => format!(
                "Proporciona datos concretos sin introducción, sin enumerarlos, y sin conclusión. Solo la información directa sobre: {topic}"
            ),
        }
    }
}
