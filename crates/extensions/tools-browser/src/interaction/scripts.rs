//! In-page JavaScript used by the interaction engine.

use super::driver::{ElementScript, PageScript};

/// Depth-first search for `selector` under `parent`: direct query first, then
/// every open shadow root and same-origin `iframe`/`frame` document in document order.
/// Cross-origin frames throw on access and are skipped.
macro_rules! deep_find {
    () => {
        r#"
    const deepFind = (parent, selector) => {
        const direct = parent.querySelector(selector);
        if (direct) {
            return direct;
        }
        for (const el of parent.querySelectorAll('*')) {
            if (el.shadowRoot) {
                const found = deepFind(el.shadowRoot, selector);
                if (found) {
                    return found;
                }
            }
            if (['iframe', 'frame'].includes(el.tagName.toLowerCase())) {
                let frameDocument;
                try {
                    frameDocument = el.contentDocument || el.contentWindow.document;
                } catch (e) {
                    continue;
                }
                if (frameDocument) {
                    const found = deepFind(frameDocument, selector);
                    if (found) {
                        return found;
                    }
                }
            }
        }
        return null;
    };
"#
    };
}

const DEEP_EXISTS: &str = concat!(
    "(selector) => {",
    deep_find!(),
    "    return deepFind(document, selector) !== null;\n}"
);

const DEEP_CLICK: &str = concat!(
    "(selector) => {",
    deep_find!(),
    r#"
    const element = deepFind(document, selector);
    if (!element) {
        return { status: 'not_found' };
    }
    if (element.tagName.toLowerCase() === 'option') {
        const owner = element.parentElement;
        owner.value = element.value;
        owner.dispatchEvent(new Event('change', { bubbles: true }));
        return { status: 'option_selected', value: element.text };
    }
    if (element.tagName.toLowerCase() === 'a') {
        element.target = '_self';
    }
    const expandedBefore = element.getAttribute('aria-expanded');
    element.click();
    const expandedAfter = element.getAttribute('aria-expanded');
    return {
        status: 'clicked',
        submenu: expandedBefore === 'false' && expandedAfter === 'true',
    };
}"#
);

const TAG_NAME: &str = "function() { return this.tagName.toLowerCase(); }";

const OUTER_HTML: &str = r#"function() {
    const target = this.tagName.toLowerCase() === 'option' ? (this.closest('select') || this) : this;
    return target.outerHTML;
}"#;

const ATTRIBUTE_VALUE: &str = r#"function(name) {
    const value = this.getAttribute(name);
    if (value !== null) {
        return value;
    }
    return name in this ? String(this[name]) : null;
}"#;

const SELECT_IN_OWNER: &str = r#"function(value) {
    const select = this.closest('select');
    if (!select) {
        return false;
    }
    select.value = value;
    select.dispatchEvent(new Event('input', { bubbles: true }));
    select.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
}"#;

const IS_VISIBLE: &str = r#"function() {
    const rect = this.getBoundingClientRect();
    const style = this.ownerDocument.defaultView.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
}"#;

impl ElementScript {
    /// Function declaration for `Runtime.callFunctionOn`.
    pub fn source(&self) -> &'static str {
        match self {
            Self::TagName => TAG_NAME,
            Self::OuterHtml => OUTER_HTML,
            Self::AttributeValue => ATTRIBUTE_VALUE,
            Self::SelectInOwner => SELECT_IN_OWNER,
            Self::IsVisible => IS_VISIBLE,
        }
    }
}

impl PageScript {
    /// Arrow function taking the selector.
    pub fn source(&self) -> &'static str {
        match self {
            Self::DeepClick => DEEP_CLICK,
            Self::DeepExists => DEEP_EXISTS,
        }
    }

    /// Expression applying the script to a JSON argument.
    pub fn invocation(&self, arg: &serde_json::Value) -> String {
        format!("({})({})", self.source(), arg)
    }
}
