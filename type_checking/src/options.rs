use strum_macros::{EnumIter, EnumString};

/// Optional checks beyond the baseline rules. All of them are off by
/// default, programs accepted without them may be rejected with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrictChecks {
    /// the return expression must match the declared return type
    pub return_type: bool,
    /// `new C()` requires `C` to be a declared class
    pub new_object_class: bool,
    /// the operand of `!` must be boolean
    pub not_operand: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
pub enum StrictCheck {
    #[strum(serialize = "return-type")]
    ReturnType,
    #[strum(serialize = "new-object-class")]
    NewObjectClass,
    #[strum(serialize = "not-operand")]
    NotOperand,
}

impl StrictChecks {
    pub fn all() -> Self {
        StrictChecks {
            return_type: true,
            new_object_class: true,
            not_operand: true,
        }
    }

    pub fn enable(&mut self, check: StrictCheck) {
        match check {
            StrictCheck::ReturnType => self.return_type = true,
            StrictCheck::NewObjectClass => self.new_object_class = true,
            StrictCheck::NotOperand => self.not_operand = true,
        }
    }

    pub fn is_enabled(&self, check: StrictCheck) -> bool {
        match check {
            StrictCheck::ReturnType => self.return_type,
            StrictCheck::NewObjectClass => self.new_object_class,
            StrictCheck::NotOperand => self.not_operand,
        }
    }
}

/// Knobs of one elaboration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElaborationOptions {
    /// log the class table after the first pass
    pub dump_class_table: bool,
    /// log the scope of every method before its body is checked
    pub dump_method_tables: bool,
    pub report_unused: bool,
    pub strict: StrictChecks,
}

impl Default for ElaborationOptions {
    fn default() -> Self {
        ElaborationOptions {
            dump_class_table: false,
            dump_method_tables: false,
            report_unused: true,
            strict: StrictChecks::default(),
        }
    }
}
