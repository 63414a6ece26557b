use crate::shift::Span;

/// Annotation classes, in the order the host declares them.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::VariantArray,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Class {
    Item,
    Field,
    Command,
    Warning,
    DataIn,
    ParityInOk,
    ParityInErr,
    DataOut,
    ParityOutOk,
    ParityOutErr,
    Break,
    Opcode,
    DataProg,
    DataDev,
    PdiBreak,
    Enable,
    Disable,
    CmdData,
}

impl Class {
    pub const fn description(self) -> &'static str {
        match self {
            Class::Item => "Item",
            Class::Field => "Field",
            Class::Command => "Command",
            Class::Warning => "Warning",
            Class::DataIn => "PDI data in",
            Class::ParityInOk => "Parity OK",
            Class::ParityInErr => "Parity error",
            Class::DataOut => "PDI data out",
            Class::ParityOutOk => "Parity OK",
            Class::ParityOutErr => "Parity error",
            Class::Break => "BREAK condition",
            Class::Opcode => "Instruction opcode",
            Class::DataProg => "Programmer data",
            Class::DataDev => "Device data",
            Class::PdiBreak => "BREAK at PDI level",
            Class::Enable => "Enable PDI",
            Class::Disable => "Disable PDI",
            Class::CmdData => "PDI command with data",
        }
    }

    pub fn row(self) -> Row {
        use strum::VariantArray;
        Row::VARIANTS
            .iter()
            .copied()
            .find(|row| row.classes().contains(&self))
            .unwrap_or(Row::Warnings)
    }
}

/// Display grouping of classes. Has no effect on decoding.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::VariantArray,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Row {
    Items,
    Fields,
    Commands,
    Warnings,
    DataIn,
    DataOut,
    DataFields,
    PdiFields,
    PdiProg,
    PdiDev,
    PdiCmds,
}

impl Row {
    pub const fn description(self) -> &'static str {
        match self {
            Row::Items => "Items",
            Row::Fields => "Fields",
            Row::Commands => "Commands",
            Row::Warnings => "Warnings",
            Row::DataIn => "PDI Data (In)",
            Row::DataOut => "PDI Data (Out)",
            Row::DataFields => "PDI Data Fields",
            Row::PdiFields => "PDI Fields",
            Row::PdiProg => "PDI Programmer In",
            Row::PdiDev => "PDI Device Out",
            Row::PdiCmds => "PDI Commands",
        }
    }

    pub const fn classes(self) -> &'static [Class] {
        use Class as C;
        match self {
            Row::Items => &[C::Item],
            Row::Fields => &[C::Field],
            Row::Commands => &[C::Command],
            Row::Warnings => &[C::Warning],
            Row::DataIn => &[C::DataIn, C::ParityInOk, C::ParityInErr],
            Row::DataOut => &[C::DataOut, C::ParityOutOk, C::ParityOutErr],
            Row::DataFields => &[C::Break],
            Row::PdiFields => &[C::Opcode, C::PdiBreak],
            Row::PdiProg => &[C::DataProg],
            Row::PdiDev => &[C::DataDev],
            Row::PdiCmds => &[C::Enable, C::Disable, C::CmdData],
        }
    }
}

/// One output record. `labels` runs from the longest rendering to the
/// tersest; the host picks whichever fits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub span: Span,
    pub class: Class,
    pub labels: Vec<String>,
}

impl Annotation {
    pub fn new(span: Span, class: Class, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let labels = labels.into_iter().map(Into::into).collect();
        Self { span, class, labels }
    }

    pub fn label(&self) -> &str {
        self.labels.first().map_or("", String::as_str)
    }
}

/// Receives decoded annotations.
pub trait Sink {
    fn put(&mut self, annotation: Annotation);
}

impl Sink for Vec<Annotation> {
    fn put(&mut self, annotation: Annotation) {
        self.push(annotation);
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn put(&mut self, annotation: Annotation) {
        S::put(&mut **self, annotation)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn put(&mut self, annotation: Annotation) {
        S::put(&mut **self, annotation)
    }
}
