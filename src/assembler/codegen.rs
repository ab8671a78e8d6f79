//! The code generator owns the output image and every label defined
//! against it.
//!
//! The image is a flat byte buffer of big-endian words. Words that
//! depend on a label are written immediately with whatever constant
//! part they carry, and their byte offsets are recorded against the
//! label. `finish` then adds each label's address into those words in
//! place; the buffer never changes length after a word is written.
use std::sync::atomic::{AtomicU32, Ordering};

use super::ast::{Argument, OpCode};
use super::error::GenerationError;

static NEXT_GENERATOR_ID: AtomicU32 = AtomicU32::new(0);

/// Handle to a label owned by a `CodeGenerator`. Handles carry the id
/// of their generator, so one from another generator is rejected.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Label {
    owner: u32,
    index: usize,
}

#[derive(Clone, Debug, Default)]
struct LabelSlot {
    position: Option<u16>,
    references: Vec<usize>,
}

pub struct CodeGenerator {
    id: u32,
    output: Vec<u8>,
    labels: Vec<LabelSlot>,
    finished: bool,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        CodeGenerator {
            id: NEXT_GENERATOR_ID.fetch_add(1, Ordering::Relaxed),
            output: Vec::new(),
            labels: Vec::new(),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The image as written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Current byte offset into the image.
    pub fn byte_position(&self) -> usize {
        self.output.len()
    }

    /// Current word address.
    pub fn position(&self) -> usize {
        self.output.len() / 2
    }

    pub fn define_label(&mut self) -> Result<Label, GenerationError> {
        self.assert_not_finished()?;

        self.labels.push(LabelSlot::default());
        Ok(Label { owner: self.id, index: self.labels.len() - 1 })
    }

    /// Binds `label` to the current word address.
    pub fn mark_label(&mut self, label: Label) -> Result<(), GenerationError> {
        self.assert_not_finished()?;
        let address = self.position();
        let slot = self.slot_mut(label)?;

        if slot.position.is_some() {
            return Err(GenerationError::AlreadyMarked);
        }
        if address > u16::MAX as usize {
            return Err(GenerationError::AddressOverflow(address));
        }

        slot.position = Some(address as u16);
        Ok(())
    }

    pub fn label_position(&self, label: Label) -> Result<Option<u16>, GenerationError> {
        Ok(self.slot(label)?.position)
    }

    /// Number of words that will be patched with `label`'s address.
    pub fn reference_count(&self, label: Label) -> Result<usize, GenerationError> {
        Ok(self.slot(label)?.references.len())
    }

    /// Emits a basic, two-operand instruction.
    pub fn emit(&mut self, op: OpCode, a: Argument, b: Argument) -> Result<(), GenerationError> {
        self.assert_not_finished()?;
        if !op.is_basic() {
            return Err(GenerationError::ExtendedArity);
        }
        self.validate_argument(&a)?;
        self.validate_argument(&b)?;

        let instruction = op.code() | (a.field() as u16) << 4 | (b.field() as u16) << 10;
        trace!("0x{:04X}: {} => 0x{:04X}", self.position(), op, instruction);

        self.write_word(instruction);
        self.write_argument(&a);
        self.write_argument(&b);
        Ok(())
    }

    /// Emits a non-basic, one-operand instruction.
    pub fn emit_extended(&mut self, op: OpCode, a: Argument) -> Result<(), GenerationError> {
        self.assert_not_finished()?;
        if op.is_basic() {
            return Err(GenerationError::BasicArity);
        }
        self.validate_argument(&a)?;

        let instruction = op.code() | (a.field() as u16) << 10;
        trace!("0x{:04X}: {} => 0x{:04X}", self.position(), op, instruction);

        self.write_word(instruction);
        self.write_argument(&a);
        Ok(())
    }

    /// Emits a raw data word.
    pub fn emit_word(&mut self, word: u16) -> Result<(), GenerationError> {
        self.assert_not_finished()?;
        self.write_word(word);
        Ok(())
    }

    /// Emits a word that will hold `label`'s address.
    pub fn emit_data(&mut self, label: Label) -> Result<(), GenerationError> {
        self.assert_not_finished()?;
        let offset = self.byte_position();
        self.slot_mut(label)?.references.push(offset);
        self.write_word(0x0000);
        Ok(())
    }

    /// Runs the patch pass and closes the generator.
    ///
    /// Every marked label is patched even if some other label was never
    /// marked; that case is reported afterwards as `UnmarkedLabels`.
    pub fn finish(&mut self) -> Result<(), GenerationError> {
        self.assert_not_finished()?;
        self.finished = true;

        let mut unmarked = 0;
        for slot in &self.labels {
            let address = match slot.position {
                Some(address) => address,
                None => {
                    unmarked += 1;
                    continue;
                },
            };

            for &offset in &slot.references {
                let word = read_word(&self.output, offset).wrapping_add(address);
                trace!("patch 0x{:04X} <= 0x{:04X}", offset / 2, word);
                self.output[offset..offset + 2].copy_from_slice(&word.to_be_bytes());
            }
        }

        if unmarked > 0 {
            return Err(GenerationError::UnmarkedLabels { count: unmarked });
        }
        Ok(())
    }

    fn assert_not_finished(&self) -> Result<(), GenerationError> {
        if self.finished {
            Err(GenerationError::Finished)
        } else {
            Ok(())
        }
    }

    fn slot(&self, label: Label) -> Result<&LabelSlot, GenerationError> {
        if label.owner != self.id {
            return Err(GenerationError::ForeignLabel);
        }
        self.labels.get(label.index).ok_or(GenerationError::ForeignLabel)
    }

    fn slot_mut(&mut self, label: Label) -> Result<&mut LabelSlot, GenerationError> {
        if label.owner != self.id {
            return Err(GenerationError::ForeignLabel);
        }
        self.labels.get_mut(label.index).ok_or(GenerationError::ForeignLabel)
    }

    fn validate_argument(&self, arg: &Argument) -> Result<(), GenerationError> {
        match arg.label_ref() {
            Some(label) => self.slot(label).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Writes an operand's trailing word, registering it against its
    /// label first.
    fn write_argument(&mut self, arg: &Argument) {
        if let Some(word) = arg.next_word() {
            if let Some(label) = arg.label_ref() {
                self.labels[label.index].references.push(self.output.len());
            }
            self.write_word(word);
        }
    }

    fn write_word(&mut self, word: u16) {
        self.output.extend_from_slice(&word.to_be_bytes());
    }
}

fn read_word(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}
