use std::thread;

use permkit_permission::{MainQueue, Permission, PermissionGateway};

fn main() {
    let (queue, main_loop) = MainQueue::new();
    let gateway = PermissionGateway::builder().dispatcher(queue).build();

    let worker = thread::spawn(move || {
        for permission in Permission::ALL {
            match gateway.status_blocking(permission) {
                Ok(status) => println!("{permission}: {status:?}"),
                Err(err) => println!("{permission}: {err}"),
            }
            gateway.request(permission, move |status| {
                println!("{permission} request finished: {status:?}");
            });
        }
    });

    worker.join().expect("worker thread panicked");
    main_loop.run_blocking();
}
