//! The table of cgroup v2 accounting files exported as metrics.
//!
//! This is plain data. Adding a row here is all that is needed to export another file,
//! as long as it uses one of the existing formats.

use super::registry::{FileSpec, MetricSpec, MultiFormat};

const fn single(file: &'static str, name: &'static str, help: &'static str) -> FileSpec {
    FileSpec::Single {
        file,
        metric: MetricSpec::gauge("", name, help),
    }
}

const fn pressure(file: &'static str, metrics: &'static [MetricSpec]) -> FileSpec {
    FileSpec::Multi {
        file,
        format: MultiFormat::Pressure,
        metrics,
    }
}

const fn flat(file: &'static str, metrics: &'static [MetricSpec]) -> FileSpec {
    FileSpec::Multi {
        file,
        format: MultiFormat::FlatKeyed,
        metrics,
    }
}

const MEMORY_STAT: &[MetricSpec] = &[
    MetricSpec::gauge("anon", "cgroup_memory_anon_bytes", "Amount of memory used in anonymous mappings such as brk(), sbrk(), and mmap(MAP_ANONYMOUS)."),
    MetricSpec::gauge("file", "cgroup_memory_file_bytes", "Amount of memory used to cache filesystem data, including tmpfs and shared memory."),
    MetricSpec::gauge("kernel", "cgroup_memory_kernel_bytes", "Amount of total kernel memory, including (kernel_stack, pagetables, percpu, vmalloc, slab) in addition to other kernel memory use cases."),
    MetricSpec::gauge("kernel_stack", "cgroup_memory_kernel_stack_bytes", "Amount of memory allocated to kernel stacks."),
    MetricSpec::gauge("pagetables", "cgroup_memory_pagetables_bytes", "Amount of memory allocated for page tables."),
    MetricSpec::gauge("sec_pagetables", "cgroup_memory_sec_pagetables_bytes", "Amount of memory allocated for secondary page tables, this currently includes KVM mmu allocations on x86 and arm64 and IOMMU page tables."),
    MetricSpec::gauge("percpu", "cgroup_memory_percpu_bytes", "Amount of memory used for storing per-cpu kernel data structures."),
    MetricSpec::gauge("sock", "cgroup_memory_sock_bytes", "Amount of memory used in network transmission buffers."),
    MetricSpec::gauge("vmalloc", "cgroup_memory_vmalloc_bytes", "Amount of memory used for vmap backed memory."),
    MetricSpec::gauge("shmem", "cgroup_memory_shmem_bytes", "Amount of cached filesystem data that is swap-backed, such as tmpfs, shm segments, shared anonymous mmap()s."),
    MetricSpec::gauge("zswap", "cgroup_memory_zswap_bytes", "Amount of memory consumed by the zswap compression backend."),
    MetricSpec::gauge("zswapped", "cgroup_memory_zswapped_bytes", "Amount of application memory swapped out to zswap."),
    MetricSpec::gauge("file_mapped", "cgroup_memory_file_mapped_bytes", "Amount of cached filesystem data mapped with mmap()."),
    MetricSpec::gauge("file_dirty", "cgroup_memory_file_dirty_bytes", "Amount of cached filesystem data that was modified but not yet written back to disk."),
    MetricSpec::gauge("file_writeback", "cgroup_memory_file_writeback_bytes", "Amount of cached filesystem data that was modified and is currently being written back to disk."),
    MetricSpec::gauge("swapcached", "cgroup_memory_swapcached_bytes", "Amount of swap cached in memory. The swapcache is accounted against both memory and swap usage."),
    MetricSpec::gauge("anon_thp", "cgroup_memory_anon_thp_bytes", "Amount of memory used in anonymous mappings backed by transparent hugepages."),
    MetricSpec::gauge("file_thp", "cgroup_memory_file_thp_bytes", "Amount of cached filesystem data backed by transparent hugepages."),
    MetricSpec::gauge("shmem_thp", "cgroup_memory_shmem_thp_bytes", "Amount of shm, tmpfs, shared anonymous mmap()s backed by transparent hugepages."),
    MetricSpec::gauge("inactive_anon", "cgroup_memory_inactive_anon_bytes", "Amount of memory on the inactive anonymous list."),
    MetricSpec::gauge("active_anon", "cgroup_memory_active_anon_bytes", "Amount of memory on the active anonymous list."),
    MetricSpec::gauge("inactive_file", "cgroup_memory_inactive_file_bytes", "Amount of memory on the inactive file list."),
    MetricSpec::gauge("active_file", "cgroup_memory_active_file_bytes", "Amount of memory on the active file list."),
    MetricSpec::gauge("unevictable", "cgroup_memory_unevictable_bytes", "Amount of memory that cannot be reclaimed."),
    MetricSpec::gauge("slab_reclaimable", "cgroup_memory_slab_reclaimable_bytes", "Amount of slab memory that might be reclaimed, such as dentries and inodes."),
    MetricSpec::gauge("slab_unreclaimable", "cgroup_memory_slab_unreclaimable_bytes", "Amount of slab memory that cannot be reclaimed under memory pressure."),
    MetricSpec::gauge("slab", "cgroup_memory_slab_bytes", "Amount of memory used for storing in-kernel data structures."),
    MetricSpec::gauge("workingset_refault_anon", "cgroup_memory_workingset_refault_anon", "Number of refaults of previously evicted anonymous pages."),
    MetricSpec::gauge("workingset_refault_file", "cgroup_memory_workingset_refault_file", "Number of refaults of previously evicted file pages."),
    MetricSpec::gauge("workingset_activate_anon", "cgroup_memory_workingset_activate_anon", "Number of refaulted anonymous pages that were immediately activated."),
    MetricSpec::gauge("workingset_activate_file", "cgroup_memory_workingset_activate_file", "Number of refaulted file pages that were immediately activated."),
    MetricSpec::gauge("workingset_restore_anon", "cgroup_memory_workingset_restore_anon", "Number of restored anonymous pages detected as an active workingset before they got reclaimed."),
    MetricSpec::gauge("workingset_restore_file", "cgroup_memory_workingset_restore_file", "Number of restored file pages detected as an active workingset before they got reclaimed."),
    MetricSpec::gauge("workingset_nodereclaim", "cgroup_memory_workingset_nodereclaim", "Number of times a shadow node has been reclaimed."),
    MetricSpec::gauge("pgscan", "cgroup_memory_pgscan", "Amount of scanned pages (in an inactive LRU list)."),
    MetricSpec::gauge("pgsteal", "cgroup_memory_pgsteal", "Amount of reclaimed pages."),
    MetricSpec::gauge("pgscan_kswapd", "cgroup_memory_pgscan_kswapd", "Amount of scanned pages by kswapd (in an inactive LRU list)."),
    MetricSpec::gauge("pgscan_direct", "cgroup_memory_pgscan_direct", "Amount of scanned pages directly (in an inactive LRU list)."),
    MetricSpec::gauge("pgscan_khugepaged", "cgroup_memory_pgscan_khugepaged", "Amount of scanned pages by khugepaged (in an inactive LRU list)."),
    MetricSpec::gauge("pgsteal_kswapd", "cgroup_memory_pgsteal_kswapd", "Amount of reclaimed pages by kswapd."),
    MetricSpec::gauge("pgsteal_direct", "cgroup_memory_pgsteal_direct", "Amount of reclaimed pages directly."),
    MetricSpec::gauge("pgsteal_khugepaged", "cgroup_memory_pgsteal_khugepaged", "Amount of reclaimed pages by khugepaged."),
    MetricSpec::gauge("pgfault", "cgroup_memory_pgfault", "Total number of page faults incurred."),
    MetricSpec::gauge("pgmajfault", "cgroup_memory_pgmajfault", "Number of major page faults incurred."),
    MetricSpec::gauge("pgrefill", "cgroup_memory_pgrefill", "Amount of scanned pages (in an active LRU list)."),
    MetricSpec::gauge("pgactivate", "cgroup_memory_pgactivate", "Amount of pages moved to the active LRU list."),
    MetricSpec::gauge("pgdeactivate", "cgroup_memory_pgdeactivate", "Amount of pages moved to the inactive LRU list."),
    MetricSpec::gauge("pglazyfree", "cgroup_memory_pglazyfree", "Amount of pages postponed to be freed under memory pressure."),
    MetricSpec::gauge("pglazyfreed", "cgroup_memory_pglazyfreed", "Amount of reclaimed lazyfree pages."),
    MetricSpec::gauge("zswpin", "cgroup_memory_zswpin", "Number of pages moved in to memory from zswap."),
    MetricSpec::gauge("zswpout", "cgroup_memory_zswpout", "Number of pages moved out of memory to zswap."),
    MetricSpec::gauge("zswpwb", "cgroup_memory_zswpwb", "Number of pages written from zswap to swap."),
    MetricSpec::gauge("thp_fault_alloc", "cgroup_memory_thp_fault_alloc", "Number of transparent hugepages allocated to satisfy a page fault."),
    MetricSpec::gauge("thp_collapse_alloc", "cgroup_memory_thp_collapse_alloc", "Number of transparent hugepages allocated to allow collapsing an existing range of pages."),
    MetricSpec::gauge("thp_swpout", "cgroup_memory_thp_swpout", "Number of transparent hugepages which are swapout in one piece without splitting."),
    MetricSpec::gauge("thp_swpout_fallback", "cgroup_memory_thp_swpout_fallback", "Number of transparent hugepages split before swapout due to failed allocation of continuous swap space."),
];

const MEMORY_EVENTS: &[MetricSpec] = &[
    MetricSpec::counter("low", "cgroup_memory_events_low_total", "Number of times the cgroup was reclaimed due to high memory pressure even though its usage was under the low boundary."),
    MetricSpec::counter("high", "cgroup_memory_events_high_total", "Number of times processes of the cgroup were throttled because the high memory boundary was exceeded."),
    MetricSpec::counter("max", "cgroup_memory_events_max_total", "Number of times the cgroup's memory usage was about to go over the max boundary."),
    MetricSpec::counter("oom", "cgroup_memory_events_oom_total", "Number of times the cgroup's memory usage reached the limit and allocation was about to fail."),
    MetricSpec::counter("oom_kill", "cgroup_memory_events_oom_kill_total", "Number of processes belonging to this cgroup killed by any kind of OOM killer."),
    MetricSpec::counter("oom_group_kill", "cgroup_memory_events_oom_group_kill_total", "Number of times a group OOM has occurred."),
];

const MEMORY_SWAP_EVENTS: &[MetricSpec] = &[
    MetricSpec::counter("high", "cgroup_memory_swap_events_high_total", "Number of times the cgroup's swap usage was over the high threshold."),
    MetricSpec::counter("max", "cgroup_memory_swap_events_max_total", "Number of times the cgroup's swap usage was about to go over the max boundary."),
    MetricSpec::counter("fail", "cgroup_memory_swap_events_fail_total", "Number of times swap allocation failed."),
];

const MEMORY_PRESSURE: &[MetricSpec] = &[
    MetricSpec::counter("some", "cgroup_memory_pressure_waiting_seconds_total", "Total time in which at least some tasks of the cgroup were stalled on memory.").micros(),
    MetricSpec::counter("full", "cgroup_memory_pressure_stalled_seconds_total", "Total time in which all non-idle tasks of the cgroup were stalled on memory.").micros(),
];

const CPU_PRESSURE: &[MetricSpec] = &[
    MetricSpec::counter("some", "cgroup_cpu_pressure_waiting_seconds_total", "Total time in which at least some tasks of the cgroup were stalled on CPU.").micros(),
    MetricSpec::counter("full", "cgroup_cpu_pressure_stalled_seconds_total", "Total time in which all non-idle tasks of the cgroup were stalled on CPU.").micros(),
];

const IO_PRESSURE: &[MetricSpec] = &[
    MetricSpec::counter("some", "cgroup_io_pressure_waiting_seconds_total", "Total time in which at least some tasks of the cgroup were stalled on I/O.").micros(),
    MetricSpec::counter("full", "cgroup_io_pressure_stalled_seconds_total", "Total time in which all non-idle tasks of the cgroup were stalled on I/O.").micros(),
];

const IRQ_PRESSURE: &[MetricSpec] = &[
    MetricSpec::counter("full", "cgroup_irq_pressure_stalled_seconds_total", "Total time in which tasks of the cgroup were stalled by IRQ/SOFTIRQ handling.").micros(),
];

const CPU_STAT: &[MetricSpec] = &[
    MetricSpec::counter("usage_usec", "cgroup_cpu_usage_seconds_total", "Total CPU time consumed by the cgroup.").micros(),
    MetricSpec::counter("user_usec", "cgroup_cpu_user_seconds_total", "CPU time the cgroup spent in user mode.").micros(),
    MetricSpec::counter("system_usec", "cgroup_cpu_system_seconds_total", "CPU time the cgroup spent in kernel mode.").micros(),
    MetricSpec::counter("nr_periods", "cgroup_cpu_periods_total", "Number of enforcement intervals that have elapsed."),
    MetricSpec::counter("nr_throttled", "cgroup_cpu_throttled_total", "Number of enforcement intervals in which the cgroup was throttled."),
    MetricSpec::counter("throttled_usec", "cgroup_cpu_throttled_seconds_total", "Total time the cgroup was throttled.").micros(),
    MetricSpec::counter("nr_bursts", "cgroup_cpu_bursts_total", "Number of enforcement intervals in which a burst occurred."),
    MetricSpec::counter("burst_usec", "cgroup_cpu_burst_seconds_total", "Total CPU time the cgroup spent bursting beyond its quota.").micros(),
    MetricSpec::counter("core_sched.force_idle_usec", "cgroup_cpu_core_sched_force_idle_seconds_total", "Total time a sibling CPU was forced idle by core scheduling.").micros(),
];

const PIDS_EVENTS: &[MetricSpec] = &[
    MetricSpec::counter("max", "cgroup_pids_events_max_total", "Number of times a fork failed because the process limit was reached."),
];

const IO_STAT: &[MetricSpec] = &[
    MetricSpec::counter("rbytes", "cgroup_io_read_bytes_total", "Number of bytes read from the device.").per_device(),
    MetricSpec::counter("wbytes", "cgroup_io_write_bytes_total", "Number of bytes written to the device.").per_device(),
    MetricSpec::counter("dbytes", "cgroup_io_discard_bytes_total", "Number of bytes discarded on the device.").per_device(),
    MetricSpec::counter("rios", "cgroup_io_read_operations_total", "Number of read operations on the device.").per_device(),
    MetricSpec::counter("wios", "cgroup_io_write_operations_total", "Number of write operations on the device.").per_device(),
    MetricSpec::counter("dios", "cgroup_io_discard_operations_total", "Number of discard operations on the device.").per_device(),
];

pub static FILES: &[FileSpec] = &[
    single("memory.min", "cgroup_memory_min_bytes", "Hard memory protection of the cgroup."),
    single("memory.low", "cgroup_memory_low_bytes", "Best-effort memory protection of the cgroup."),
    single("memory.high", "cgroup_memory_high_bytes", "Memory usage throttle limit of the cgroup."),
    single("memory.max", "cgroup_memory_max_bytes", "Memory usage hard limit of the cgroup."),
    single("memory.current", "cgroup_memory_current_bytes", "Total amount of memory currently being used by the cgroup and its descendants."),
    single("memory.peak", "cgroup_memory_peak_bytes", "Maximum memory usage recorded for the cgroup and its descendants."),
    single("memory.swap.high", "cgroup_memory_swap_high_bytes", "Swap usage throttle limit of the cgroup."),
    single("memory.swap.max", "cgroup_memory_swap_max_bytes", "Swap usage hard limit of the cgroup."),
    single("memory.swap.current", "cgroup_memory_swap_current_bytes", "Total amount of swap currently being used by the cgroup and its descendants."),
    single("memory.swap.peak", "cgroup_memory_swap_peak_bytes", "Maximum swap usage recorded for the cgroup and its descendants."),
    single("memory.zswap.max", "cgroup_memory_zswap_max_bytes", "Zswap usage hard limit of the cgroup."),
    single("memory.zswap.current", "cgroup_memory_zswap_current_bytes", "Total amount of memory consumed by the zswap compression backend."),
    single("pids.current", "cgroup_pids_current", "Number of processes currently in the cgroup and its descendants."),
    single("pids.max", "cgroup_pids_max", "Hard limit of number of processes."),
    single("pids.peak", "cgroup_pids_peak", "Maximum number of processes recorded for the cgroup and its descendants."),
    // TODO: memory.numastat needs a per-node label and its own decoder
    flat("memory.stat", MEMORY_STAT),
    flat("memory.events", MEMORY_EVENTS),
    flat("memory.swap.events", MEMORY_SWAP_EVENTS),
    pressure("memory.pressure", MEMORY_PRESSURE),
    pressure("cpu.pressure", CPU_PRESSURE),
    pressure("io.pressure", IO_PRESSURE),
    pressure("irq.pressure", IRQ_PRESSURE),
    flat("cpu.stat", CPU_STAT),
    FileSpec::Multi {
        file: "io.stat",
        format: MultiFormat::DeviceNested,
        metrics: IO_STAT,
    },
    flat("pids.events", PIDS_EVENTS),
];
