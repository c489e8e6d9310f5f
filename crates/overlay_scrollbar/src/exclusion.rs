//! Press-target exclusion
//!
//! Decides whether a pointer press may start a free drag-scroll and whether
//! a key press belongs to a text-editing control. Form controls, icons,
//! editors and component-library widgets keep their own pointer and key
//! behavior.

use overlay_dom::{Document, NodeId, SelectorList};
use rustc_hash::FxHashSet;
use std::sync::OnceLock;
use tracing::warn;

/// Classes that block drag-scroll on an element or its near ancestors
pub const DEFAULT_EXCLUDE_CLASSES: &[&str] = &[
    // Plain inputs
    "editor",
    "textarea",
    "input",
    "select",
    "textfield",
    "form-control",
    "contenteditable",
    // Material UI
    "MuiInputBase-input",
    "MuiSelect-select",
    "MuiOutlinedInput-input",
    "MuiFilledInput-input",
    "MuiInput-input",
    "MuiFormControl-root",
    "MuiTextField-root",
    "MuiSelect-root",
    "MuiOutlinedInput-root",
    "MuiFilledInput-root",
    "MuiInput-root",
    "MuiAutocomplete-input",
    "MuiDatePicker-input",
    "MuiSlider-thumb",
    "MuiSlider-rail",
    "MuiSlider-track",
    "MuiSlider-mark",
    "MuiSlider-markLabel",
    "MuiSlider-root",
    "MuiSlider-colorPrimary",
    "MuiSlider-sizeMedium",
    "MuiIconButton-root",
    "MuiButton-root",
    "MuiButtonBase-root",
    "MuiTouchRipple-root",
    "MuiCheckbox-root",
    "MuiRadio-root",
    "MuiSwitch-root",
    "PrivateSwitchBase-root",
    // Ant Design
    "ant-input",
    "ant-input-affix-wrapper",
    "ant-input-group-addon",
    "ant-input-number",
    "ant-input-number-handler",
    "ant-select",
    "ant-select-selector",
    "ant-select-selection-search",
    "ant-select-dropdown",
    "ant-cascader",
    "ant-cascader-input",
    "ant-picker",
    "ant-picker-input",
    "ant-time-picker",
    "ant-calendar-picker",
    "ant-slider",
    "ant-slider-track",
    "ant-slider-handle",
    "ant-switch",
    "ant-checkbox",
    "ant-checkbox-wrapper",
    "ant-radio",
    "ant-radio-wrapper",
    "ant-rate",
    "ant-upload",
    "ant-upload-drag",
    "ant-form-item",
    "ant-form-item-control",
    "ant-btn",
    "ant-dropdown",
    "ant-dropdown-trigger",
    "ant-menu",
    "ant-menu-item",
    "ant-tooltip",
    "ant-popover",
    "ant-modal",
    "ant-drawer",
    "ant-tree-select",
    "ant-auto-complete",
    "ant-mentions",
    "ant-transfer",
    // shadcn/ui
    "ui-input",
    "ui-textarea",
    "ui-select",
    "ui-select-trigger",
    "ui-select-content",
    "ui-select-item",
    "ui-button",
    "ui-checkbox",
    "ui-radio-group",
    "ui-switch",
    "ui-slider",
    "ui-range-slider",
    "ui-calendar",
    "ui-date-picker",
    "ui-combobox",
    "ui-command",
    "ui-command-input",
    "ui-popover",
    "ui-dialog",
    "ui-sheet",
    "ui-dropdown-menu",
    "ui-context-menu",
    "ui-menubar",
    "ui-navigation-menu",
    "ui-form",
    "ui-form-control",
    "ui-form-item",
    "ui-form-field",
    "ui-label",
    // Radix
    "radix-ui",
    "radix-select",
    "radix-dropdown",
    "radix-dialog",
    "radix-popover",
    "radix-accordion",
    "radix-tabs",
    "radix-slider",
    "radix-switch",
    "radix-checkbox",
    "radix-radio",
    // Quill
    "ql-editor",
    "ql-container",
    "ql-toolbar",
    "ql-picker",
    "ql-picker-label",
    "ql-picker-options",
    "ql-formats",
    "ql-snow",
    "ql-bubble",
    "quill",
    "quilleditor",
    // Monaco
    "monaco-editor",
    "monaco-editor-background",
    "view-lines",
    "decorationsOverviewRuler",
    "monaco-scrollable-element",
    // CodeMirror
    "CodeMirror",
    "CodeMirror-code",
    "CodeMirror-lines",
    "CodeMirror-scroll",
    "CodeMirror-sizer",
    "cm-editor",
    "cm-focused",
    "cm-content",
    // TinyMCE
    "tox-editor-container",
    "tox-editor-header",
    "tox-edit-area",
    "tox-tinymce",
    "mce-content-body",
    // CKEditor
    "ck-editor",
    "ck-content",
    "ck-toolbar",
    "ck-editor__editable",
    "ck-widget",
    // Slate
    "slate-editor",
    "slate-content",
    // Draft.js
    "DraftEditor-root",
    "DraftEditor-editorContainer",
    "public-DraftEditor-content",
    // ehfuse editor
    "ehfuse-editor",
    "ehfuse-editor-wrapper",
    "ehfuse-editor-content",
    "ehfuse-toolbar",
    "ehfuse-toolbar-group",
    "ehfuse-cursor",
    // Other editors
    "text-editor",
    "rich-text-editor",
    "wysiwyg",
    "ace_editor",
    "ace_content",
];

/// Input types that block drag-scroll
const TEXT_LIKE_INPUT_TYPES: &[&str] = &[
    "text", "password", "email", "number", "search", "tel", "url", "checkbox", "radio",
];

/// Input types a browser recognizes; anything else behaves as `text`
const KNOWN_INPUT_TYPES: &[&str] = &[
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

const SVG_TAGS: &[&str] = &["svg", "path", "circle", "rect", "line", "polygon", "polyline"];

/// Ancestor levels above the press target checked for excluded classes
pub const EXCLUDE_CLASS_DEPTH: usize = 5;

/// Class walk stops after a dialog content root
pub const DIALOG_CONTENT_CLASS: &str = "MuiDialogContent-root";

/// Compiled drag-scroll exclusion rules
#[derive(Clone, Debug)]
pub struct DragScrollFilter {
    classes: FxHashSet<String>,
    selectors: Vec<SelectorList>,
}

impl DragScrollFilter {
    /// Built-in classes plus `extra_classes`; invalid selectors are skipped
    pub fn new(extra_classes: &[String], selectors: &[String]) -> Self {
        let classes = DEFAULT_EXCLUDE_CLASSES
            .iter()
            .map(|c| c.to_string())
            .chain(extra_classes.iter().cloned())
            .collect();

        let selectors = selectors
            .iter()
            .filter_map(|source| match SelectorList::parse(source) {
                Ok(list) => Some(list),
                Err(err) => {
                    warn!(%err, "ignoring invalid drag-scroll exclude selector");
                    None
                }
            })
            .collect();

        Self { classes, selectors }
    }

    pub fn selector_count(&self) -> usize {
        self.selectors.len()
    }

    /// Whether a press on `target` must not start a drag-scroll
    pub fn excludes(&self, doc: &Document, target: NodeId) -> bool {
        let tag = doc.tag_name(target);

        if tag == "input" {
            return TEXT_LIKE_INPUT_TYPES.contains(&input_type(doc, target).as_str());
        }
        if matches!(tag, "textarea" | "select" | "button") || SVG_TAGS.contains(&tag) {
            return true;
        }
        if doc.attribute(target, "contenteditable") == Some("true") {
            return true;
        }
        if self.selectors.iter().any(|s| s.matches(doc, target)) {
            return true;
        }

        self.class_chain_excluded(doc, target)
    }

    /// Check the target and up to [`EXCLUDE_CLASS_DEPTH`] ancestors for excluded classes
    fn class_chain_excluded(&self, doc: &Document, target: NodeId) -> bool {
        for node in doc.inclusive_ancestors(target).take(EXCLUDE_CLASS_DEPTH + 1) {
            if doc.classes(node).iter().any(|c| self.classes.contains(c)) {
                return true;
            }
            if doc.has_class(node, DIALOG_CONTENT_CLASS) {
                break;
            }
        }
        false
    }
}

impl Default for DragScrollFilter {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}

/// Effective input type: lowercased, unknown or missing values mean `text`
fn input_type(doc: &Document, node: NodeId) -> String {
    let ty = doc
        .attribute(node, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if KNOWN_INPUT_TYPES.contains(&ty.as_str()) {
        ty
    } else {
        "text".to_string()
    }
}

fn text_field_selector() -> &'static SelectorList {
    static SELECTOR: OnceLock<SelectorList> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        SelectorList::parse(".MuiTextField-root, [contenteditable=\"true\"]").unwrap_or_else(|err| {
            warn!(%err, "text field selector failed to parse");
            SelectorList::default()
        })
    })
}

/// Whether key presses on `target` belong to a text-editing control
pub fn is_text_editing_target(doc: &Document, target: NodeId) -> bool {
    if matches!(doc.tag_name(target), "input" | "textarea" | "select") {
        return true;
    }
    if doc.is_content_editable(target) {
        return true;
    }
    if doc.attribute(target, "role") == Some("textbox") {
        return true;
    }
    if doc.has_class(target, "MuiInputBase-input") {
        return true;
    }
    doc.closest(target, text_field_selector()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_body() -> (Document, NodeId) {
        let doc = Document::new();
        let body = doc.body();
        (doc, body)
    }

    #[test]
    fn test_input_types() {
        let (mut doc, body) = doc_with_body();
        let filter = DragScrollFilter::default();

        let text = doc.create_child(body, "input", &[]).unwrap();
        assert!(filter.excludes(&doc, text));

        let range = doc.create_child(body, "input", &[]).unwrap();
        doc.set_attribute(range, "type", "range").unwrap();
        assert!(!filter.excludes(&doc, range));

        let checkbox = doc.create_child(body, "input", &[]).unwrap();
        doc.set_attribute(checkbox, "type", "CHECKBOX").unwrap();
        assert!(filter.excludes(&doc, checkbox));

        let bogus = doc.create_child(body, "input", &[]).unwrap();
        doc.set_attribute(bogus, "type", "fancy").unwrap();
        assert!(filter.excludes(&doc, bogus));
    }

    #[test]
    fn test_range_input_skips_class_walk() {
        let (mut doc, body) = doc_with_body();
        let filter = DragScrollFilter::default();
        let editor = doc.create_child(body, "div", &["editor"]).unwrap();
        let range = doc.create_child(editor, "input", &[]).unwrap();
        doc.set_attribute(range, "type", "range").unwrap();
        assert!(!filter.excludes(&doc, range));
    }

    #[test]
    fn test_controls_and_svg() {
        let (mut doc, body) = doc_with_body();
        let filter = DragScrollFilter::default();
        for tag in ["textarea", "select", "button", "svg", "path", "polyline"] {
            let node = doc.create_child(body, tag, &[]).unwrap();
            assert!(filter.excludes(&doc, node), "{tag} should be excluded");
        }
        let div = doc.create_child(body, "div", &[]).unwrap();
        assert!(!filter.excludes(&doc, div));
    }

    #[test]
    fn test_contenteditable_attribute() {
        let (mut doc, body) = doc_with_body();
        let filter = DragScrollFilter::default();
        let node = doc.create_child(body, "div", &[]).unwrap();
        doc.set_attribute(node, "contenteditable", "true").unwrap();
        assert!(filter.excludes(&doc, node));
    }

    #[test]
    fn test_class_walk_depth() {
        let (mut doc, body) = doc_with_body();
        let filter = DragScrollFilter::new(&["no-drag".to_string()], &[]);

        let top = doc.create_child(body, "div", &["no-drag"]).unwrap();
        let mut node = top;
        let mut chain = Vec::new();
        for _ in 0..6 {
            node = doc.create_child(node, "div", &[]).unwrap();
            chain.push(node);
        }

        // Five levels below the excluded ancestor still sees it
        assert!(filter.excludes(&doc, chain[4]));
        // Six levels below does not
        assert!(!filter.excludes(&doc, chain[5]));
    }

    #[test]
    fn test_class_walk_stops_at_dialog_content() {
        let (mut doc, body) = doc_with_body();
        let filter = DragScrollFilter::default();
        let editor = doc.create_child(body, "div", &["editor"]).unwrap();
        let dialog = doc.create_child(editor, "div", &[DIALOG_CONTENT_CLASS]).unwrap();
        let item = doc.create_child(dialog, "div", &[]).unwrap();
        assert!(!filter.excludes(&doc, item));
    }

    #[test]
    fn test_user_selectors() {
        let (mut doc, body) = doc_with_body();
        let filter = DragScrollFilter::new(&[], &["[data-grip]".to_string(), "::bad".to_string()]);
        assert_eq!(filter.selector_count(), 1);

        let grip = doc.create_child(body, "div", &[]).unwrap();
        doc.set_attribute(grip, "data-grip", "").unwrap();
        assert!(filter.excludes(&doc, grip));
    }

    #[test]
    fn test_text_editing_targets() {
        let (mut doc, body) = doc_with_body();

        let input = doc.create_child(body, "input", &[]).unwrap();
        assert!(is_text_editing_target(&doc, input));

        let textbox = doc.create_child(body, "div", &[]).unwrap();
        doc.set_attribute(textbox, "role", "textbox").unwrap();
        assert!(is_text_editing_target(&doc, textbox));

        let field = doc.create_child(body, "div", &["MuiTextField-root"]).unwrap();
        let adornment = doc.create_child(field, "span", &[]).unwrap();
        assert!(is_text_editing_target(&doc, adornment));

        let editor = doc.create_child(body, "div", &[]).unwrap();
        doc.set_attribute(editor, "contenteditable", "").unwrap();
        let para = doc.create_child(editor, "p", &[]).unwrap();
        assert!(is_text_editing_target(&doc, para));

        let plain = doc.create_child(body, "div", &[]).unwrap();
        assert!(!is_text_editing_target(&doc, plain));
    }
}
