use std::fmt;

use serde::{Serialize, Serializer};

/// What an element kind can be asked to do beyond plain clicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Has a `Checked` state (check / uncheck)
    pub toggle: bool,
    /// Has a `SelectedItemIndex` (select by index)
    pub select: bool,
    /// Exposes rows of cells (get table)
    pub table: bool,
}

impl Capabilities {
    const NONE: Capabilities = Capabilities {
        toggle: false,
        select: false,
        table: false,
    };
    const TOGGLE: Capabilities = Capabilities {
        toggle: true,
        ..Capabilities::NONE
    };
    const SELECT: Capabilities = Capabilities {
        select: true,
        ..Capabilities::NONE
    };
    const TABLE: Capabilities = Capabilities {
        table: true,
        ..Capabilities::NONE
    };
    const ALL: Capabilities = Capabilities {
        toggle: true,
        select: true,
        table: true,
    };
}

macro_rules! element_kinds {
    ($( $variant:ident => $name:literal, $caps:ident; )+) => {
        /// Closed set of UI control categories a locator may end in.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ElementKind {
            $( $variant, )+
        }

        impl ElementKind {
            /// Every supported kind, in resolution order.
            pub const ALL: &'static [ElementKind] = &[ $( ElementKind::$variant, )+ ];

            /// Canonical adapter name, as sent to the automation driver.
            pub fn name(self) -> &'static str {
                match self {
                    $( ElementKind::$variant => $name, )+
                }
            }

            pub fn capabilities(self) -> Capabilities {
                match self {
                    $( ElementKind::$variant => Capabilities::$caps, )+
                }
            }
        }
    };
}

element_kinds! {
    AbbrTag => "AbbrTag", NONE;
    AcronymTag => "AcronymTag", NONE;
    AddressTag => "AddressTag", NONE;
    AreaTag => "AreaTag", NONE;
    ArticleTag => "ArticleTag", NONE;
    AsideTag => "AsideTag", NONE;
    ATag => "ATag", NONE;
    AudioTag => "AudioTag", NONE;
    BaseFontTag => "BaseFontTag", NONE;
    BaseTag => "BaseTag", NONE;
    BdoTag => "BdoTag", NONE;
    BigTag => "BigTag", NONE;
    BodyTag => "BodyTag", NONE;
    BrTag => "BrTag", NONE;
    BTag => "BTag", NONE;
    Button => "Button", NONE;
    ButtonTag => "ButtonTag", NONE;
    CanvasTag => "CanvasTag", NONE;
    Cell => "Cell", NONE;
    CenterTag => "CenterTag", NONE;
    CheckBox => "CheckBox", TOGGLE;
    CiteTag => "CiteTag", NONE;
    CodeTag => "CodeTag", NONE;
    ColGroupTag => "ColGroupTag", NONE;
    ColTag => "ColTag", NONE;
    Column => "Column", NONE;
    ComboBox => "ComboBox", SELECT;
    CommandTag => "CommandTag", NONE;
    Container => "Container", NONE;
    ContextMenu => "ContextMenu", NONE;
    DataListTag => "DataListTag", SELECT;
    DateTime => "DateTime", NONE;
    DdTag => "DdTag", NONE;
    DelTag => "DelTag", NONE;
    DetailsTag => "DetailsTag", NONE;
    DfnTag => "DfnTag", NONE;
    DirTag => "DirTag", NONE;
    DivTag => "DivTag", NONE;
    DlTag => "DlTag", NONE;
    EmbedTag => "EmbedTag", NONE;
    EmTag => "EmTag", NONE;
    FieldSetTag => "FieldSetTag", NONE;
    FigureTag => "FigureTag", NONE;
    FontTag => "FontTag", NONE;
    Form => "Form", NONE;
    FormTag => "FormTag", NONE;
    InputTag => "InputTag", TOGGLE;
    Link => "Link", NONE;
    List => "List", SELECT;
    ListItem => "ListItem", NONE;
    MenuBar => "MenuBar", NONE;
    MenuItem => "MenuItem", TOGGLE;
    Picture => "Picture", NONE;
    ProgressBar => "ProgressBar", NONE;
    RadioButton => "RadioButton", TOGGLE;
    Row => "Row", NONE;
    ScrollBar => "ScrollBar", NONE;
    SelectTag => "SelectTag", SELECT;
    Slider => "Slider", NONE;
    SpanTag => "SpanTag", NONE;
    StatusBar => "StatusBar", NONE;
    TabPage => "TabPage", NONE;
    Table => "Table", TABLE;
    Text => "Text", NONE;
    TitleBar => "TitleBar", NONE;
    ToggleButton => "ToggleButton", TOGGLE;
    Tree => "Tree", SELECT;
    TreeItem => "TreeItem", TOGGLE;
    Unknown => "Unknown", ALL;
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ElementKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
