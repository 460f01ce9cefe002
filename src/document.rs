// License: MIT

use indexmap::IndexMap;

use crate::decode;
use crate::error::{TransformError, UidefError};
use crate::reader;
use crate::ui::{self, Fields, UiBlock, UiNode};
use crate::value::Value;

/// A fully processed UI definition: the ordered block list plus typed
/// access to the classified nodes.
///
/// Construction is a pure, synchronous pass over the source; the document
/// holds no shared state and is safe to build concurrently on any thread.
#[derive(Debug)]
pub struct UiDocument {
    blocks: Vec<UiBlock>,
}

impl UiDocument {
    /// Run the whole pipeline on EDN source text: read into the raw dynamic
    /// tree, decode into the tagged value tree, transform into blocks.
    ///
    /// # Example
    /// ```ignore
    /// let doc = UiDocument::from_str("#ui/definition [#ui/base [ui/group]]")?;
    /// ```
    pub fn from_str(source: &str) -> Result<Self, UidefError> {
        let raw = reader::read_str(source)?;
        Self::from_raw(&raw)
    }

    /// Decode and transform a pre-parsed raw tree (for callers that bring
    /// their own EDN reader, as long as it emits the same wrapper shapes).
    pub fn from_raw(raw: &serde_json::Value) -> Result<Self, UidefError> {
        let value = decode::decode(raw)?;
        Ok(Self::from_value(&value)?)
    }

    /// Transform an already decoded value tree.
    pub fn from_value(root: &Value) -> Result<Self, TransformError> {
        let blocks = ui::process_ui(root)?;
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[UiBlock] {
        &self.blocks
    }

    pub fn base_blocks(&self) -> impl Iterator<Item = &UiBlock> {
        self.blocks.iter().filter(|b| b.is_base())
    }

    pub fn addon_blocks(&self) -> impl Iterator<Item = &UiBlock> {
        self.blocks.iter().filter(|b| b.is_addon())
    }

    /// All input field maps, in definition order across every block.
    pub fn inputs(&self) -> Vec<&Fields> {
        self.collect(|node| match node {
            UiNode::Input { fields } => Some(fields),
            _ => None,
        })
    }

    /// All output field maps, in definition order across every block.
    pub fn outputs(&self) -> Vec<&Fields> {
        self.collect(|node| match node {
            UiNode::Output { fields } => Some(fields),
            _ => None,
        })
    }

    /// Logic bindings: every `:target`/`:source` map.
    pub fn bindings(&self) -> Vec<&Fields> {
        self.collect(|node| match node {
            UiNode::TargetSource { fields } => Some(fields),
            _ => None,
        })
    }

    /// Test cases: every `:when`/`:then` map.
    pub fn cases(&self) -> Vec<&Fields> {
        self.collect(|node| match node {
            UiNode::WhenThen { fields } => Some(fields),
            _ => None,
        })
    }

    /// Bare marker symbols (`ui/logic`, `ui/test`, ...), `ui/group` excluded.
    pub fn symbols(&self) -> Vec<&str> {
        self.collect(|node| match node {
            UiNode::Symbol { name } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Label -> field-map registry over all inputs and outputs, in
    /// definition order. Logic and test entries refer to fields by these
    /// labels. The first occurrence of a label wins; later duplicates are
    /// ignored.
    pub fn field_index(&self) -> IndexMap<String, &Fields> {
        let mut index = IndexMap::new();
        for block in &self.blocks {
            for node in block.body() {
                let fields = match node {
                    UiNode::Input { fields } | UiNode::Output { fields } => fields,
                    _ => continue,
                };
                if let Some(label) = fields.label() {
                    index.entry(label.to_string()).or_insert(fields);
                }
            }
        }
        index
    }

    fn collect<'a, T: ?Sized>(&'a self, pick: impl Fn(&'a UiNode) -> Option<&'a T>) -> Vec<&'a T> {
        self.blocks
            .iter()
            .flat_map(|b| b.body())
            .filter_map(pick)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EdnError, TransformError};
    use crate::ui::FieldValue;

    const FIXTURE: &str = r#"
    ; example
    #ui/definition [
      #ui/base [
        ui/group
        {:input text, :label "Description"}
        {:input number, :label "Amount"}
        {:input number, :label "Days"}
        {:input money, :label "Price/Unit"}
        {:output money, :label "output"}

        ui/logic
        {:target "output", :source ["Amount" * "Days" * "Price/Unit"]}

        ui/test
        {:when {"Amount" 1, "Days" 5, "Price/Unit" 1000}
         :then {"output" 5000}}
        {:when {"Amount" 2, "Days" 5, "Price/Unit" 1000}
         :then {"output" 10000}}
      ]
    ]
    "#;

    #[test]
    fn test_fixture_end_to_end() {
        let doc = UiDocument::from_str(FIXTURE).expect("Failed to process fixture");

        assert_eq!(doc.blocks().len(), 1);
        assert!(doc.blocks()[0].is_base());

        let body = doc.blocks()[0].body();
        println!("{:#?}", body);
        assert_eq!(body.len(), 11);

        assert!(matches!(&body[0], UiNode::Group { sym } if sym == "ui/group"));
        assert!(matches!(&body[1], UiNode::Input { .. }));
        assert!(matches!(&body[2], UiNode::Input { .. }));
        assert!(matches!(&body[3], UiNode::Input { .. }));
        assert!(matches!(&body[4], UiNode::Input { .. }));
        assert!(matches!(&body[5], UiNode::Output { .. }));
        assert!(matches!(&body[6], UiNode::Symbol { name } if name == "ui/logic"));
        assert!(matches!(&body[7], UiNode::TargetSource { .. }));
        assert!(matches!(&body[8], UiNode::Symbol { name } if name == "ui/test"));
        assert!(matches!(&body[9], UiNode::WhenThen { .. }));
        assert!(matches!(&body[10], UiNode::WhenThen { .. }));

        let UiNode::Input { fields } = &body[1] else { unreachable!() };
        assert_eq!(fields.get("input"), Some(&FieldValue::Symbol("text".into())));
        assert_eq!(fields.label(), Some("Description"));

        let UiNode::TargetSource { fields } = &body[7] else { unreachable!() };
        assert_eq!(fields.get("target"), Some(&FieldValue::String("output".into())));
        let Some(FieldValue::Seq(source)) = fields.get("source") else {
            panic!("Expected :source to project as a sequence");
        };
        assert_eq!(source.len(), 5);
        assert_eq!(source[1], FieldValue::Symbol("*".into()));
    }

    #[test]
    fn test_accessors() {
        let doc = UiDocument::from_str(FIXTURE).unwrap();

        assert_eq!(doc.inputs().len(), 4);
        assert_eq!(doc.outputs().len(), 1);
        assert_eq!(doc.bindings().len(), 1);
        assert_eq!(doc.cases().len(), 2);
        assert_eq!(doc.symbols(), vec!["ui/logic", "ui/test"]);

        let case = doc.cases()[0];
        let Some(FieldValue::Map(when)) = case.get("when") else {
            panic!("Expected :when to project as a map");
        };
        assert_eq!(when.get("Days"), Some(&FieldValue::Number(5.0)));
        let Some(FieldValue::Map(then)) = case.get("then") else {
            panic!("Expected :then to project as a map");
        };
        assert_eq!(then.get("output"), Some(&FieldValue::Number(5000.0)));
    }

    #[test]
    fn test_field_index_order_and_lookup() {
        let doc = UiDocument::from_str(FIXTURE).unwrap();
        let index = doc.field_index();

        let labels: Vec<&str> = index.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Description", "Amount", "Days", "Price/Unit", "output"]);

        let amount = index.get("Amount").unwrap();
        assert_eq!(amount.get("input"), Some(&FieldValue::Symbol("number".into())));
    }

    #[test]
    fn test_field_index_first_label_wins() {
        let doc = UiDocument::from_str(
            r#"#ui/definition [#ui/base [
                {:input text, :label "a"}
                {:input number, :label "a"}
            ]]"#,
        )
        .unwrap();

        let index = doc.field_index();
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("a").unwrap().get("input"),
            Some(&FieldValue::Symbol("text".into()))
        );
    }

    #[test]
    fn test_addon_sibling_block() {
        let doc = UiDocument::from_str(
            r#"#ui/definition [
                #ui/base [ui/group {:input text, :label "a"}]
                #ui/addon [{:input money, :label "b"}]
            ]"#,
        )
        .unwrap();

        assert_eq!(doc.base_blocks().count(), 1);
        assert_eq!(doc.addon_blocks().count(), 1);
        // Addon bodies classify by the same rules.
        assert_eq!(doc.inputs().len(), 2);
        assert_eq!(doc.field_index().keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_pipeline_errors_carry_their_stage() {
        let err = UiDocument::from_str("#ui/definition [").unwrap_err();
        assert!(matches!(err, UidefError::Read(EdnError::UnexpectedEof { .. })));

        let err = UiDocument::from_raw(&serde_json::json!({ "bogus": 1 })).unwrap_err();
        assert!(matches!(err, UidefError::Decode(_)));

        let err = UiDocument::from_str("#ui/definition [#ui/other []]").unwrap_err();
        assert!(matches!(
            err,
            UidefError::Transform(TransformError::UnknownBlockTag { .. })
        ));
    }
}
