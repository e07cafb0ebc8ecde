// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Baseband Contributors 2026.

//! Register map for the baseband engine command interface.

use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

use crate::static_ref::StaticRef;

register_structs! {
    /// Command registers of the baseband engine.
    pub BasebandRegisters {
        /// Instruction register. Writing dispatches one command to the
        /// engine; the operand register is latched at that instant.
        /// Reads return the last word written.
        (0x000 => pub inst: ReadWrite<u32, INST::Register>),
        /// Operand register consumed by the engine when `inst` is
        /// written.
        (0x004 => pub additional_data: ReadWrite<u32>),
        (0x008 => @END),
    }
}

register_bitfields![u32,
    pub INST [
        /// Primary opcode.
        PRIMARY OFFSET(0) NUMBITS(4) [
            Config = 0x1
        ],
        /// Secondary opcode. For CONFIG instructions this selects the
        /// field being configured.
        SECONDARY OFFSET(4) NUMBITS(4) [],
        /// Immediate operand.
        DATA OFFSET(8) NUMBITS(24) []
    ]
];

/// Physical base address of the baseband command registers.
pub const BASEBAND_BASE: StaticRef<BasebandRegisters> =
    unsafe { StaticRef::new(0x8000 as *const BasebandRegisters) };
