// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Baseband Contributors 2026.

//! Command interface to the baseband engine.

use tock_registers::interfaces::Writeable;

use crate::instruction::{ChannelIndex, ConfigField, Instruction};
use crate::registers::BasebandRegisters;
use crate::static_ref::StaticRef;

/// Driver for the baseband engine command registers.
///
/// The driver holds no state of its own; every operation reduces to the
/// two-store dispatch sequence in [`Baseband::issue`].
pub struct Baseband {
    registers: StaticRef<BasebandRegisters>,
}

impl Baseband {
    pub const fn new(base: StaticRef<BasebandRegisters>) -> Baseband {
        Baseband { registers: base }
    }

    /// Issue one command to the engine.
    ///
    /// The engine latches `ADDITIONAL_DATA` when `INST` is written, so
    /// the operand store must land first. Both accesses are volatile
    /// stores; the compiler may not merge, elide, or reorder them
    /// against each other, which is exactly the ordering the hardware
    /// requires.
    pub fn issue(&self, instruction: Instruction, additional_data: u32) {
        let regs = self.registers;
        regs.additional_data.set(additional_data);
        regs.inst.set(instruction.word());
    }

    /// Configure one field of the engine.
    pub fn configure(&self, field: ConfigField, value: u32) {
        self.issue(Instruction::config(field), value);
    }

    /// Tune the engine to a BLE channel.
    pub fn set_channel_index(&self, channel: ChannelIndex) {
        self.configure(ConfigField::ChannelIndex, channel.get() as u32);
    }
}
