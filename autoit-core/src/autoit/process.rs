//! `AU3_Process*`, `AU3_Run*` and `AU3_Shutdown`.

use super::signatures as sig;
use super::{AutoIt, SW_SHOWNORMAL};
use crate::errors::AutoItError;

impl AutoIt {
    pub fn process_close(&mut self, process: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::PROCESS_CLOSE, &mut [process.into()])
    }

    /// `process` is a name (`notepad.exe`) or a PID.
    pub fn process_exists(&mut self, process: &str) -> Result<bool, AutoItError> {
        self.call_bool(&sig::PROCESS_EXISTS, &mut [process.into()])
    }

    /// `priority` runs from 0 (idle) to 5 (realtime).
    pub fn process_set_priority(&mut self, process: &str, priority: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::PROCESS_SET_PRIORITY, &mut [process.into(), priority.into()])
    }

    pub fn process_wait(&mut self, process: &str, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::PROCESS_WAIT, &mut [process.into(), timeout.unwrap_or(0).into()])
    }

    pub fn process_wait_close(&mut self, process: &str, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::PROCESS_WAIT_CLOSE, &mut [process.into(), timeout.unwrap_or(0).into()])
    }

    /// Start `program` and return its PID (0 on failure).
    pub fn run(&mut self, program: &str, dir: &str, show: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::RUN, &mut [program.into(), dir.into(), show.unwrap_or(SW_SHOWNORMAL).into()])
    }

    /// Start `program`, wait for it and return its exit code.
    pub fn run_wait(&mut self, program: &str, dir: &str, show: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::RUN_WAIT, &mut [program.into(), dir.into(), show.unwrap_or(SW_SHOWNORMAL).into()])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn run_as(
        &mut self,
        user: &str,
        domain: &str,
        password: &str,
        logon_flag: i32,
        program: &str,
        dir: &str,
        show: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::RUN_AS,
            &mut [
                user.into(),
                domain.into(),
                password.into(),
                logon_flag.into(),
                program.into(),
                dir.into(),
                show.unwrap_or(SW_SHOWNORMAL).into(),
            ],
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn run_as_wait(
        &mut self,
        user: &str,
        domain: &str,
        password: &str,
        logon_flag: i32,
        program: &str,
        dir: &str,
        show: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::RUN_AS_WAIT,
            &mut [
                user.into(),
                domain.into(),
                password.into(),
                logon_flag.into(),
                program.into(),
                dir.into(),
                show.unwrap_or(SW_SHOWNORMAL).into(),
            ],
        )
    }

    /// `flags` combines 0 logoff, 1 shutdown, 2 reboot, 4 force, 8 power down.
    pub fn shutdown(&mut self, flags: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::SHUTDOWN, &mut [flags.into()])
    }
}
